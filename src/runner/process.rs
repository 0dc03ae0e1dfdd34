//! Child process execution.
//!
//! Every command runs through a shell, with a bounded wait. The
//! [`ProcessExecutor`] trait is the seam the runner drives, so tests and
//! dry runs can stand in for real processes.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{exit_code, PyssError, Result};

/// Interval between checks on a running child.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// One command, fully resolved and interpolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    /// `None` runs under the host default interpreter.
    pub shell: Option<String>,
    pub working_dir: PathBuf,
    /// Variables set on top of the inherited environment.
    pub env: BTreeMap<String, String>,
    /// Send stdout/stderr to the null device.
    pub disable_output: bool,
    pub timeout: Duration,
}

impl Invocation {
    /// Program and arguments that run this invocation.
    pub fn argv(&self) -> Vec<String> {
        let (program, mut args) = shell_invocation(self.shell.as_deref());
        args.push(self.command.clone());
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program);
        argv.extend(args);
        argv
    }
}

/// Launches invocations and reports their exit codes.
pub trait ProcessExecutor {
    /// Run one invocation to completion.
    ///
    /// # Arguments
    ///
    /// * `invocation` - The interpolated command with its shell, working
    ///   directory, environment overlay and timeout
    ///
    /// # Returns
    ///
    /// Returns the exit code of the command. A non-zero exit is `Ok(code)`.
    /// Returns 130 if the child was terminated by a signal.
    ///
    /// # Errors
    ///
    /// Returns `Spawn` if the shell cannot be launched, `Timeout` if the
    /// command outlives `invocation.timeout`, or `Io` if waiting fails.
    fn execute(&self, invocation: &Invocation) -> Result<i32>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl ProcessExecutor for ShellExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<i32> {
        let argv = invocation.argv();
        log::debug!("spawning {argv:?} in {}", invocation.working_dir.display());

        let mut command = Command::new(&argv[0]);
        command.args(&argv[1..]);
        command.current_dir(&invocation.working_dir);
        command.envs(&invocation.env);

        command.stdin(Stdio::inherit());
        if invocation.disable_output {
            command.stdout(Stdio::null());
            command.stderr(Stdio::null());
        } else {
            command.stdout(Stdio::inherit());
            command.stderr(Stdio::inherit());
        }

        let child = command.spawn().map_err(|source| PyssError::Spawn {
            command: invocation.command.clone(),
            source,
        })?;

        let status = wait_with_timeout(child, invocation.timeout).map_err(|e| match e {
            WaitError::TimedOut => PyssError::Timeout {
                command: invocation.command.clone(),
                seconds: invocation.timeout.as_secs_f64(),
            },
            WaitError::Io(e) => PyssError::Io(e),
        })?;

        let code = status.code().unwrap_or(exit_code::INTERRUPTED);
        log::debug!("'{}' exited with {code}", invocation.command);
        Ok(code)
    }
}

/// Prints what would run instead of running it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl ProcessExecutor for DryRunExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<i32> {
        println!("{}", format_dry_run_command(invocation));
        io::stdout().flush().ok();
        Ok(exit_code::SUCCESS)
    }
}

/// Format an invocation for display in dry-run mode.
pub fn format_dry_run_command(invocation: &Invocation) -> String {
    let mut line = format!("Would run: {}", shell_words::join(invocation.argv()));
    if !invocation.env.is_empty() {
        let vars: Vec<String> = invocation
            .env
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        line.push_str(&format!(" (env: {})", vars.join(" ")));
    }
    line
}

/// Program and leading arguments for running a command under `shell`.
///
/// The shell string may carry its own arguments (`bash --noprofile`). The
/// flag that introduces the command depends on the shell: `/C` for `cmd`,
/// `-Command` for PowerShell, `-c` otherwise.
pub fn shell_invocation(shell: Option<&str>) -> (String, Vec<String>) {
    let parts = shell
        .map(|s| shell_words::split(s).unwrap_or_else(|_| vec![s.to_string()]))
        .unwrap_or_default();

    let Some((program, extra)) = parts.split_first() else {
        return default_shell();
    };

    let mut args = extra.to_vec();
    args.push(command_flag(program).to_string());
    (program.clone(), args)
}

fn command_flag(program: &str) -> &'static str {
    let stem = Path::new(program)
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match stem.as_str() {
        "cmd" => "/C",
        "powershell" | "pwsh" => "-Command",
        _ => "-c",
    }
}

#[cfg(windows)]
fn default_shell() -> (String, Vec<String>) {
    let comspec = std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string());
    (comspec, vec!["/C".to_string()])
}

#[cfg(not(windows))]
fn default_shell() -> (String, Vec<String>) {
    ("/bin/sh".to_string(), vec!["-c".to_string()])
}

enum WaitError {
    TimedOut,
    Io(io::Error),
}

impl From<io::Error> for WaitError {
    fn from(e: io::Error) -> Self {
        WaitError::Io(e)
    }
}

/// Wait for `child`, killing it once `timeout` has passed.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> std::result::Result<ExitStatus, WaitError> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if started.elapsed() >= timeout {
            log::warn!("child {} exceeded {timeout:?}, killing it", child.id());
            let _ = child.kill();
            let _ = child.wait();
            return Err(WaitError::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
