//! CLI argument definitions for pyss.
//!
//! Uses clap with derive macros for argument parsing.
//!
//! # Example
//!
//! ```no_run
//! use pyss::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! println!("Script: {:?}", cli.script);
//! ```

use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use clap_complete::{generate, Shell};

use crate::runner::RunOptions;

/// Run the scripts defined in pyss.yaml.
#[derive(Parser, Debug)]
#[command(name = "pyss")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Name of the script to run
    #[arg(value_name = "SCRIPT")]
    pub script: Option<String>,

    /// List available scripts
    #[arg(short, long)]
    pub list: bool,

    /// Hide the output of the script and its dependencies
    #[arg(short, long)]
    pub silent: bool,

    /// Omit the [pyss] progress lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Path to the scripts file (default: search for pyss.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Show commands without executing them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<CliShell>,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliShell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    Powershell,
    /// Elvish shell
    Elvish,
}

impl From<CliShell> for Shell {
    fn from(shell: CliShell) -> Self {
        match shell {
            CliShell::Bash => Shell::Bash,
            CliShell::Zsh => Shell::Zsh,
            CliShell::Fish => Shell::Fish,
            CliShell::Powershell => Shell::PowerShell,
            CliShell::Elvish => Shell::Elvish,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Directory the config search starts from.
    pub fn start_dir(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Options for running the selected script.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            silent: self.silent,
            quiet: self.quiet,
            dry_run: self.dry_run,
            ..RunOptions::default()
        }
    }

    /// Default `log` filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }

    /// Print the help text to stdout.
    pub fn print_help() {
        let _ = Cli::command().print_help();
    }

    /// Generate shell completions and write to stdout.
    pub fn generate_completions(shell: CliShell) {
        let mut cmd = Cli::command();
        generate(Shell::from(shell), &mut cmd, "pyss", &mut std::io::stdout());
    }
}
