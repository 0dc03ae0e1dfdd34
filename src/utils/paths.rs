//! Path utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::PyssError;

/// Maximum number of parent directories to search.
pub const MAX_SEARCH_DEPTH: usize = 10;

/// Accepted config file names, compared case-insensitively.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["pyss.yaml", "pyss.yml"];

/// Find the pyss.yaml file starting from the given directory.
///
/// Searches the given directory and up to 10 parent directories.
///
/// # Errors
///
/// Returns an error if no config file is found.
pub fn find_config_file(start_dir: &Path) -> Result<PathBuf> {
    let start = start_dir.canonicalize().with_context(|| {
        format!(
            "Cannot access directory '{}': path does not exist or is not accessible",
            start_dir.display()
        )
    })?;

    let mut current = start.as_path();
    let mut depth = 0;

    while depth <= MAX_SEARCH_DEPTH {
        if let Some(found) = config_file_in(current)? {
            log::debug!("found config file {}", found.display());
            return Ok(found);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
                depth += 1;
            }
            _ => break,
        }
    }

    Err(PyssError::NoConfigFile {
        path: start,
        depth: MAX_SEARCH_DEPTH,
    }
    .into())
}

/// The config file directly inside `dir`, if any.
///
/// `pyss.yaml` wins over `pyss.yml` when both exist.
fn config_file_in(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read directory: {}", dir.display()))
        }
    };

    let mut candidates: Vec<(usize, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            CONFIG_FILE_NAMES
                .iter()
                .position(|n| *n == name)
                .map(|rank| (rank, entry.path()))
        })
        .collect();

    candidates.sort();
    Ok(candidates.into_iter().next().map(|(_, path)| path))
}
