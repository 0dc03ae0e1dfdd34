//! pyss - Python-style Simple Scripts
//!
//! Entry point for the pyss CLI application.

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use pyss::cli::Cli;
use pyss::config::load_config;
use pyss::error::{exit_code, PyssError};
use pyss::runner::run_script;
use pyss::scripts::{list_scripts, ScriptTable};

fn main() -> ExitCode {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            // Check if it's one of our custom errors with good formatting
            if let Some(pyss_err) = err.downcast_ref::<PyssError>() {
                print_error(&pyss_err.to_string());
                pyss_err.exit_code()
            } else {
                print_error(&format!("{err:#}"));
                exit_code::GENERAL_ERROR
            }
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    // Handle shell completions early
    if let Some(shell) = cli.completions {
        Cli::generate_completions(shell);
        return Ok(exit_code::SUCCESS);
    }

    log::debug!("CLI arguments = {cli:?}");

    if !cli.list && cli.script.is_none() {
        print_error("No script name provided.");
        Cli::print_help();
        return Ok(exit_code::GENERAL_ERROR);
    }

    let table = load_config(cli.file.as_deref(), &cli.start_dir())?;

    if cli.list {
        print_scripts(&table);
        return Ok(exit_code::SUCCESS);
    }

    let Some(name) = cli.script.as_deref() else {
        return Ok(exit_code::GENERAL_ERROR);
    };
    let code = run_script(&table, name, &cli.run_options())?;
    log::debug!("'{name}' finished with exit code {code}");
    Ok(code)
}

/// Print `Error: <message>` with the title in red.
fn print_error(message: &str) {
    io::stdout().flush().ok();
    eprintln!("{}: {message}", "Error".red());
}

/// Print the non-internal scripts with their descriptions.
fn print_scripts(table: &ScriptTable) {
    println!("Run script with: {}", "pyss <script_name>".yellow());
    println!(
        "Available Scripts found in {}:",
        table.document().file_name().green()
    );

    let scripts = list_scripts(table);
    let width = scripts
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    for (name, description) in scripts {
        let padded = format!("{name:<width$}");
        println!("    - {} : {description}", padded.cyan());
    }
}
