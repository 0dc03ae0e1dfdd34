//! pyss - Python-style Simple Scripts
//!
//! A small task runner: named scripts in a `pyss.yaml` file, each a shell
//! command (or several) with per-platform variants, `before`/`after`
//! dependencies and scoped environment variables.
//!
//! # Features
//!
//! - **Declarative**: scripts, hooks and variables live in one YAML file
//! - **Cross-platform**: per-platform commands and shells with a `cmd` fallback
//! - **Scoped env**: variables are visible only while their script runs
//! - **Predictable**: sequential, depth-first, first failure wins
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface argument parsing
//! - [`config`] - Finding, parsing and validating `pyss.yaml`
//! - [`error`] - Error types and exit codes
//! - [`runner`] - Script execution
//! - [`scripts`] - The validated script model
//! - [`utils`] - Path utilities
//!
//! # Example
//!
//! ```no_run
//! use pyss::config::load_config;
//! use pyss::runner::{run_script, RunOptions};
//! use std::path::Path;
//!
//! let table = load_config(None, Path::new(".")).expect("Failed to load pyss.yaml");
//! let code = run_script(&table, "build", &RunOptions::default()).expect("Failed to run");
//! println!("exit code: {code}");
//! ```

/// CLI argument definitions.
pub mod cli;

/// Configuration file discovery, parsing and validation.
pub mod config;

/// Error types and result helpers.
pub mod error;

/// Script execution.
pub mod runner;

/// Script definitions and platform identifiers.
pub mod scripts;

/// Path utilities.
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use error::{PyssError, Result};
pub use runner::{run_script, RunOptions};
pub use scripts::{list_scripts, Platform, ScriptDefinition, ScriptTable};
