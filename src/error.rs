//! Custom error types for pyss.
//!
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for pyss.
pub mod exit_code {
    /// Success.
    pub const SUCCESS: i32 = 0;
    /// General error.
    pub const GENERAL_ERROR: i32 = 1;
    /// No pyss.yaml found.
    pub const NO_CONFIG: i32 = 2;
    /// Invalid or incompatible configuration.
    pub const INVALID_CONFIG: i32 = 3;
    /// A command exceeded its time limit.
    pub const TIMEOUT: i32 = 124;
    /// Interrupted (Ctrl+C) or killed by a signal.
    pub const INTERRUPTED: i32 = 130;
}

/// Main error type for pyss.
#[derive(Error, Debug)]
pub enum PyssError {
    /// No pyss.yaml found.
    #[error(
        "No PySS YAML (pyss.yaml) file found in {path} or any parent directory (searched up to {depth} levels)"
    )]
    NoConfigFile { path: PathBuf, depth: usize },

    /// The configuration file failed validation.
    #[error("Invalid config at {path}:\n  {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// The configuration requires a different pyss version.
    #[error("{message}\n\nCurrent version: {current}.")]
    UnsupportedVersion { message: String, current: String },

    /// Script not found.
    #[error("Script '{name}' not found.")]
    ScriptNotFound { name: String },

    /// Script not found with suggestions.
    #[error("Script '{name}' not found.\n\nDid you mean: {suggestions}?\n\nRun 'pyss --list' to see all available scripts.")]
    ScriptNotFoundWithSuggestions { name: String, suggestions: String },

    /// An internal script was requested directly.
    #[error("Script '{name}' is internal and can only be used as a dependency.")]
    InternalScriptInvocation { name: String },

    /// A command referenced an environment variable that is not set.
    #[error("Environment variable '{name}' not set.")]
    UndefinedVariable { name: String },

    /// No command variant applies to the running platform.
    #[error("No command defined for platform '{platform}' in {command} and no 'cmd' fallback given.")]
    UnresolvedCommand { platform: String, command: String },

    /// A command ran longer than the allowed time and was killed.
    #[error("Command '{command}' timed out after {seconds} seconds and was killed.")]
    Timeout { command: String, seconds: f64 },

    /// A script depends on itself, directly or through other scripts.
    #[error("Cyclic dependency detected: {chain}")]
    CyclicDependency { chain: String },

    /// The shell for a command could not be started.
    #[error("Failed to execute '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PyssError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PyssError::NoConfigFile { .. } => exit_code::NO_CONFIG,
            PyssError::InvalidConfig { .. } => exit_code::INVALID_CONFIG,
            PyssError::UnsupportedVersion { .. } => exit_code::INVALID_CONFIG,
            PyssError::ScriptNotFound { .. } => exit_code::GENERAL_ERROR,
            PyssError::ScriptNotFoundWithSuggestions { .. } => exit_code::GENERAL_ERROR,
            PyssError::InternalScriptInvocation { .. } => exit_code::GENERAL_ERROR,
            PyssError::UndefinedVariable { .. } => exit_code::GENERAL_ERROR,
            PyssError::UnresolvedCommand { .. } => exit_code::GENERAL_ERROR,
            PyssError::Timeout { .. } => exit_code::TIMEOUT,
            PyssError::CyclicDependency { .. } => exit_code::GENERAL_ERROR,
            PyssError::Spawn { .. } => exit_code::GENERAL_ERROR,
            PyssError::Io(_) => exit_code::GENERAL_ERROR,
        }
    }

    /// Create a script not found error with suggestions based on available scripts.
    pub fn script_not_found_with_suggestions(name: &str, scripts: &[&str]) -> Self {
        let suggestions = find_similar_scripts(name, scripts);
        if suggestions.is_empty() {
            PyssError::ScriptNotFound {
                name: name.to_string(),
            }
        } else {
            PyssError::ScriptNotFoundWithSuggestions {
                name: name.to_string(),
                suggestions: suggestions.join(", "),
            }
        }
    }
}

/// Find similar script names using simple string distance.
fn find_similar_scripts(name: &str, scripts: &[&str]) -> Vec<String> {
    let name_lower = name.to_lowercase();
    let mut matches: Vec<(String, usize)> = scripts
        .iter()
        .filter_map(|&s| {
            let s_lower = s.to_lowercase();
            let dist = simple_distance(&name_lower, &s_lower);
            if dist <= 2 || s_lower.contains(&name_lower) || name_lower.contains(&s_lower) {
                Some((s.to_string(), dist))
            } else {
                None
            }
        })
        .collect();

    matches.sort_by_key(|(_, d)| *d);

    matches
        .into_iter()
        .take(3)
        .map(|(s, _)| format!("'{}'", s))
        .collect()
}

/// Levenshtein distance between two short strings.
fn simple_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Single rolling row instead of the full matrix
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Result type alias for pyss operations.
pub type Result<T> = std::result::Result<T, PyssError>;
