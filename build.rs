//! Build script for pyss.
//!
//! Generates man pages using clap_mangen.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};

/// Minimal CLI struct for man page generation.
///
/// This duplicates the CLI definition to avoid build dependency issues.
#[derive(Parser)]
#[command(name = "pyss")]
#[command(author, version, about = "Run the scripts defined in pyss.yaml")]
#[command(disable_version_flag = true)]
#[command(
    long_about = "pyss runs named scripts declared in a pyss.yaml file: shell commands with \
    per-platform variants, before/after dependencies and scoped environment variables.\n\n\
    The file is searched for in the current directory and its parents. Run with --list \
    to see the available scripts."
)]
struct Cli {
    /// Name of the script to run
    #[arg(value_name = "SCRIPT")]
    script: Option<String>,

    /// List available scripts
    #[arg(short, long)]
    list: bool,

    /// Hide the output of the script and its dependencies
    #[arg(short, long)]
    silent: bool,

    /// Omit the [pyss] progress lines
    #[arg(short, long)]
    quiet: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Path to the scripts file (default: search for pyss.yaml)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Show commands without executing them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
    Elvish,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Only generate man pages for release builds or when explicitly requested
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile != "release" && env::var("PYSS_GEN_MANPAGE").is_err() {
        return;
    }

    let out_dir = match env::var_os("OUT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => return,
    };

    let man = clap_mangen::Man::new(Cli::command());

    let mut buffer = Vec::new();
    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to generate man page: {e}");
        return;
    }

    let man_path = out_dir.join("pyss.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {e}");
        return;
    }

    // Also copy to docs directory for distribution
    if let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") {
        let docs_dir = PathBuf::from(manifest_dir).join("docs");
        if docs_dir.exists() {
            let _ = fs::copy(&man_path, docs_dir.join("pyss.1"));
        }
    }
}
