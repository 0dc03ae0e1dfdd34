//! Script execution.
//!
//! Runs a script from the table: its scoped environment, `before`
//! dependencies, its own commands and `after` dependencies, stopping at the
//! first non-zero exit code.

use std::io::{self, Write};

use colored::Colorize;

use super::command::{self, ShellDefaults};
use super::env::EnvScope;
use super::interpolate::{highlight, interpolate};
use super::process::{DryRunExecutor, Invocation, ProcessExecutor, ShellExecutor};
use crate::error::{exit_code, PyssError, Result};
use crate::scripts::{CommandSpec, EnvMap, Platform, ScriptDefinition, ScriptTable};

/// State that changes as execution descends into dependencies.
///
/// A context is never modified; nested work derives a new one.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    disable_output: bool,
    env: EnvScope,
    call_stack: Vec<String>,
}

impl ExecutionContext {
    /// Root context over `env`.
    pub fn new(env: EnvScope, disable_output: bool) -> Self {
        Self {
            disable_output,
            env,
            call_stack: Vec::new(),
        }
    }

    /// Whether child output and progress lines are suppressed.
    pub fn disable_output(&self) -> bool {
        self.disable_output
    }

    /// The environment visible at this level.
    pub fn env(&self) -> &EnvScope {
        &self.env
    }

    /// Names of the scripts currently executing, outermost first.
    pub fn call_stack(&self) -> &[String] {
        &self.call_stack
    }

    /// Same context with a different output policy.
    pub fn with_output_disabled(&self, disable_output: bool) -> Self {
        Self {
            disable_output,
            ..self.clone()
        }
    }

    /// Same context with `vars` primed on top of the current scope.
    pub fn primed(&self, vars: &EnvMap) -> Self {
        Self {
            env: self.env.prime(vars),
            ..self.clone()
        }
    }

    /// Context for running script `name` inside this one.
    ///
    /// # Errors
    ///
    /// Returns `CyclicDependency` if `name` is already executing.
    pub fn entering(&self, name: &str) -> Result<Self> {
        if self.call_stack.iter().any(|s| s == name) {
            let mut chain = self.call_stack.clone();
            chain.push(name.to_string());
            return Err(PyssError::CyclicDependency {
                chain: chain.join(" -> "),
            });
        }
        let mut call_stack = self.call_stack.clone();
        call_stack.push(name.to_string());
        Ok(Self {
            call_stack,
            ..self.clone()
        })
    }
}

/// Options for a top-level run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Suppress child output and progress lines.
    pub silent: bool,
    /// Suppress progress lines only.
    pub quiet: bool,
    /// Print commands instead of running them.
    pub dry_run: bool,
    pub platform: Platform,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            silent: false,
            quiet: false,
            dry_run: false,
            platform: Platform::current(),
        }
    }
}

/// Runs scripts from one table with one process executor.
pub struct ScriptRunner<'a> {
    table: &'a ScriptTable,
    executor: &'a dyn ProcessExecutor,
    platform: Platform,
    quiet: bool,
}

impl<'a> ScriptRunner<'a> {
    /// Create a runner for the current platform.
    pub fn new(table: &'a ScriptTable, executor: &'a dyn ProcessExecutor) -> Self {
        Self {
            table,
            executor,
            platform: Platform::current(),
            quiet: false,
        }
    }

    /// Resolve platform variants for `platform` instead of the host.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Omit `[pyss]` progress lines.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub(super) fn table(&self) -> &ScriptTable {
        self.table
    }

    /// Run a script as the user asked for it.
    ///
    /// Unknown and internal scripts are rejected before anything runs. The
    /// document's global `env` is visible to the whole run.
    ///
    /// # Errors
    ///
    /// Returns `ScriptNotFound` (with suggestions when close matches exist),
    /// `InternalScriptInvocation`, or any error raised while running.
    pub fn run_top_level(&self, name: &str, env: EnvScope, silent: bool) -> Result<i32> {
        let script = self.table.get(name).ok_or_else(|| {
            PyssError::script_not_found_with_suggestions(name, &self.table.public_names())
        })?;
        if script.is_internal() {
            return Err(PyssError::InternalScriptInvocation {
                name: name.to_string(),
            });
        }

        let ctx = ExecutionContext::new(env, silent).primed(self.table.document().env());
        self.run(name, &ctx)
    }

    /// Run script `name` within `ctx`.
    ///
    /// # Arguments
    ///
    /// * `name` - The script to run
    /// * `ctx` - Output policy, environment and call stack of the caller
    ///
    /// # Returns
    ///
    /// Returns 0 when `before`, the script's commands and `after` all
    /// succeed, otherwise the first non-zero exit code. Later steps are
    /// skipped once one fails.
    ///
    /// # Errors
    ///
    /// Returns `ScriptNotFound` for unknown names and `CyclicDependency` when
    /// `name` is already executing, plus any resolution, interpolation or
    /// process error from the steps.
    pub fn run(&self, name: &str, ctx: &ExecutionContext) -> Result<i32> {
        let script = self
            .table
            .get(name)
            .ok_or_else(|| PyssError::ScriptNotFound {
                name: name.to_string(),
            })?;
        let ctx = ctx.entering(name)?;

        if self.shows_progress(&ctx) {
            announce("run script", name, |s| s.cyan());
        }

        // Dropping `ctx` at any return releases the script's env
        let ctx = ctx.primed(script.get_env());
        log::debug!("running '{name}' (stack: {})", ctx.call_stack().join(" -> "));

        if let Some(before) = script.get_before() {
            let code = self.run_dependencies(before, script, &ctx)?;
            if code != exit_code::SUCCESS {
                return Ok(code);
            }
        }

        let code = self.run_commands(script.commands(), script, &ctx)?;
        if code != exit_code::SUCCESS {
            return Ok(code);
        }

        if let Some(after) = script.get_after() {
            return self.run_dependencies(after, script, &ctx);
        }

        Ok(exit_code::SUCCESS)
    }

    /// Run commands in order, stopping at the first non-zero exit code.
    pub(super) fn run_commands(
        &self,
        commands: &[CommandSpec],
        owner: &ScriptDefinition,
        ctx: &ExecutionContext,
    ) -> Result<i32> {
        for spec in commands {
            let code = self.run_command(spec, owner, ctx)?;
            if code != exit_code::SUCCESS {
                return Ok(code);
            }
        }
        Ok(exit_code::SUCCESS)
    }

    /// Resolve, interpolate and execute one command.
    pub(super) fn run_command(
        &self,
        spec: &CommandSpec,
        owner: &ScriptDefinition,
        ctx: &ExecutionContext,
    ) -> Result<i32> {
        let defaults = ShellDefaults {
            script: owner.get_shell(),
            header: self.table.document().header().shell.as_ref(),
        };
        let resolved = command::resolve(spec, defaults, self.platform)?;

        let command = interpolate(resolved.command, ctx.env())?;
        let shell = resolved.shell.map(|s| interpolate(s, ctx.env())).transpose()?;

        if self.shows_progress(ctx) {
            let label = resolved.shell.unwrap_or("default shell");
            announce(label, &highlight(resolved.command), |s| s.blue());
        }

        let invocation = Invocation {
            command,
            shell,
            working_dir: self.table.document().working_dir().to_path_buf(),
            env: ctx.env().overlay().clone(),
            disable_output: ctx.disable_output(),
            timeout: self.table.document().timeout(),
        };
        self.executor.execute(&invocation)
    }

    fn shows_progress(&self, ctx: &ExecutionContext) -> bool {
        !self.quiet && !ctx.disable_output()
    }
}

/// Print a `[pyss] [<header>] '<message>'` progress line.
fn announce(header: &str, message: &str, paint: impl Fn(&str) -> colored::ColoredString) {
    println!("{} '{}'", paint(&format!("[pyss] [{header}]")), message);
    io::stdout().flush().ok();
}

/// Run script `name` from `table`.
///
/// Uses real processes, or prints them when `options.dry_run` is set. The
/// process environment is snapshotted once and never modified.
///
/// # Arguments
///
/// * `table` - The loaded scripts file
/// * `name` - The script the user asked for
/// * `options` - Output flags, dry run and the platform to resolve for
///
/// # Returns
///
/// Returns the exit code of the run (0 for success, the first non-zero
/// child exit code otherwise). Returns 130 if a child was killed by a signal.
///
/// # Errors
///
/// Returns `ScriptNotFound` or `InternalScriptInvocation` before anything
/// runs, and `Timeout`, `Spawn` or other errors raised while running. See
/// [`ScriptRunner::run_top_level`].
pub fn run_script(table: &ScriptTable, name: &str, options: &RunOptions) -> Result<i32> {
    let executor: &dyn ProcessExecutor = if options.dry_run {
        &DryRunExecutor
    } else {
        &ShellExecutor
    };

    ScriptRunner::new(table, executor)
        .with_platform(options.platform)
        .with_quiet(options.quiet)
        .run_top_level(name, EnvScope::from_process(), options.silent)
}
