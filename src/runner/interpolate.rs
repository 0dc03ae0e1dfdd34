//! `${NAME}` placeholder expansion.

use std::borrow::Cow;
use std::sync::OnceLock;

use colored::Colorize;
use regex::{Captures, Regex};

use super::env::EnvScope;
use crate::error::{PyssError, Result};

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid regex pattern")
    })
}

/// Expand every `${NAME}` in `text` from `scope`.
///
/// Fails on the first undefined name in text order; nothing is substituted then.
pub fn interpolate(text: &str, scope: &EnvScope) -> Result<String> {
    let re = placeholder();

    if let Some(missing) = re
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|name| !scope.contains(name))
    {
        return Err(PyssError::UndefinedVariable { name: missing });
    }

    let expanded = re.replace_all(text, |caps: &Captures<'_>| {
        scope.get(&caps[1]).unwrap_or_default().to_string()
    });
    Ok(expanded.into_owned())
}

/// Render `${NAME}` tokens in a distinct color for progress output.
pub fn highlight(text: &str) -> Cow<'_, str> {
    placeholder().replace_all(text, |caps: &Captures<'_>| caps[0].magenta().to_string())
}
