//! Configuration file loading and parsing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use semver::Version;

use super::types::RawConfig;
use super::validate::validate;
use crate::error::PyssError;
use crate::scripts::{ConfigHeader, ScriptTable};
use crate::utils::find_config_file;

/// Version of this build, compared against `min_version` / `max_version`.
///
/// # Errors
///
/// Returns an error if the crate version is not valid semver.
pub fn current_version() -> Result<Version> {
    Version::parse(env!("CARGO_PKG_VERSION")).context("Invalid crate version")
}

/// Load and validate the scripts file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML, fails
/// validation (`InvalidConfig`), or requires another pyss version
/// (`UnsupportedVersion`).
pub fn load_scripts(path: &Path) -> Result<ScriptTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let raw: RawConfig = serde_yaml::from_str(&content).map_err(|e| PyssError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let table = validate(raw, path).map_err(|e| PyssError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    check_version(table.document().header(), &current_version()?)?;

    log::debug!(
        "loaded {} scripts from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Locate and load the scripts file.
///
/// An explicit `cli_config_path` is used as is; otherwise the file is
/// searched for from `start_dir` upwards.
///
/// # Errors
///
/// Returns `NoConfigFile` when nothing is found, or any error from
/// [`load_scripts`].
pub fn load_config(cli_config_path: Option<&Path>, start_dir: &Path) -> Result<ScriptTable> {
    match cli_config_path {
        Some(path) => load_scripts(path).with_context(|| {
            format!(
                "Failed to load config from CLI-specified path: {}",
                path.display()
            )
        }),
        None => load_scripts(&find_config_file(start_dir)?),
    }
}

/// Check the header's version bounds against `current`.
///
/// # Errors
///
/// Returns `UnsupportedVersion` if `current` is below `min_version` or
/// above `max_version`.
pub fn check_version(header: &ConfigHeader, current: &Version) -> Result<(), PyssError> {
    if let Some(min) = &header.min_version {
        if current < min {
            return Err(PyssError::UnsupportedVersion {
                message: format!("This PySS project requires at least version {min} of PySS."),
                current: current.to_string(),
            });
        }
    }
    if let Some(max) = &header.max_version {
        if current > max {
            return Err(PyssError::UnsupportedVersion {
                message: format!("PySS version {current} is not supported by this PySS project."),
                current: current.to_string(),
            });
        }
    }
    Ok(())
}
