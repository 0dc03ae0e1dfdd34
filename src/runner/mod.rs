//! Runner module for pyss.
//!
//! Resolves, interpolates and executes scripts and their dependencies.

mod command;
mod dependency;
mod env;
mod executor;
mod interpolate;
mod process;


pub use command::{resolve, resolve_command, resolve_shell, ResolvedCommand, ShellDefaults};
pub use env::EnvScope;
pub use executor::{run_script, ExecutionContext, RunOptions, ScriptRunner};
pub use interpolate::{highlight, interpolate};
pub use process::{
    format_dry_run_command, shell_invocation, DryRunExecutor, Invocation, ProcessExecutor,
    ShellExecutor,
};
