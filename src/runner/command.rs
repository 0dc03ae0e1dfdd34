//! Resolution of command and shell specs for the running platform.

use std::collections::BTreeMap;

use crate::error::{PyssError, Result};
use crate::scripts::{CommandSpec, Platform, ShellSpec};

/// Shell defaults a command inherits when it has no shell of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellDefaults<'a> {
    /// The owning script's `shell`.
    pub script: Option<&'a ShellSpec>,
    /// The `pyss.shell` header entry.
    pub header: Option<&'a ShellSpec>,
}

/// A command ready for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCommand<'a> {
    pub command: &'a str,
    /// `None` means the host default interpreter.
    pub shell: Option<&'a str>,
}

/// Look up `platform` in a variant map: its own key, then its OS family.
fn variant(variants: &BTreeMap<String, String>, platform: Platform) -> Option<&str> {
    variants
        .get(platform.key())
        .or_else(|| variants.get(platform.family()))
        .map(String::as_str)
}

/// Pick the command string for `platform`: its variant, its family
/// (`nt` / `posix`), else `cmd`.
pub fn resolve_command(spec: &CommandSpec, platform: Platform) -> Result<&str> {
    match spec {
        CommandSpec::Literal(command) => Ok(command),
        CommandSpec::PlatformMap {
            variants, fallback, ..
        } => variant(variants, platform)
            .or(fallback.as_deref())
            .ok_or_else(|| PyssError::UnresolvedCommand {
                platform: platform.key().to_string(),
                command: spec.to_string(),
            }),
    }
}

/// Pick the shell for `platform` from one spec, if it names one.
pub fn resolve_shell(spec: &ShellSpec, platform: Platform) -> Option<&str> {
    match spec {
        ShellSpec::Literal(shell) => Some(shell),
        ShellSpec::PlatformMap(variants) => variant(variants, platform),
    }
}

/// Resolve a command together with its shell.
///
/// The shell comes from the most specific level that names one for `platform`:
/// the command itself, then the script, then the header.
pub fn resolve<'a>(
    spec: &'a CommandSpec,
    defaults: ShellDefaults<'a>,
    platform: Platform,
) -> Result<ResolvedCommand<'a>> {
    let command = resolve_command(spec, platform)?;
    let shell = [spec.shell(), defaults.script, defaults.header]
        .into_iter()
        .flatten()
        .find_map(|level| resolve_shell(level, platform));

    log::debug!(
        "resolved '{command}' for {platform} with shell {}",
        shell.unwrap_or("<default>")
    );
    Ok(ResolvedCommand { command, shell })
}
