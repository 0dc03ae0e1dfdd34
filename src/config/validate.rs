//! Structural validation of a raw document into a [`ScriptTable`].
//!
//! Every error names where it happened, e.g. `scripts[1].before[0]`.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::types::{RawConfig, RawEnv, RawHeader, RawScript};
use crate::scripts::{
    CommandSpec, ConfigDocument, ConfigHeader, Dependency, DependencyAction, DependencySpec,
    DetailedDependency, EnvMap, Platform, ScriptBody, ScriptDefinition, ScriptTable, ShellSpec,
    FAMILY_KEYS,
};

/// A rule the document breaks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{location}: {message}")]
pub struct ValidationError {
    pub location: String,
    pub message: String,
}

type Result<T> = std::result::Result<T, ValidationError>;

fn invalid<T>(location: &str, message: impl Into<String>) -> Result<T> {
    Err(ValidationError {
        location: location.to_string(),
        message: message.into(),
    })
}

fn version_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("Invalid regex pattern"))
}

/// Check `raw` and build the typed table for the file at `location`.
pub fn validate(raw: RawConfig, location: &Path) -> Result<ScriptTable> {
    let header = header(raw.pyss.as_ref().unwrap_or(&RawHeader::default()))?;
    let env = raw.env.as_ref().map(env_map).unwrap_or_default();

    let mut seen = HashSet::new();
    let mut scripts = Vec::with_capacity(raw.scripts.len());
    for (i, script) in raw.scripts.iter().enumerate() {
        let loc = format!("scripts[{i}]");
        let definition = script_definition(script, &loc)?;
        if !seen.insert(definition.name().to_string()) {
            return invalid(
                &loc,
                format!("duplicate script name '{}'", definition.name()),
            );
        }
        scripts.push(definition);
    }

    let document = ConfigDocument::new(location)
        .with_header(header)
        .with_env(env);
    Ok(ScriptTable::new(document, scripts))
}

fn header(raw: &RawHeader) -> Result<ConfigHeader> {
    let min_version = raw
        .min_version
        .as_deref()
        .map(|v| version(v, "pyss.min_version"))
        .transpose()?;
    let max_version = raw
        .max_version
        .as_deref()
        .map(|v| version(v, "pyss.max_version"))
        .transpose()?;
    let shell = raw
        .shell
        .as_ref()
        .map(|s| shell(s, "pyss.shell"))
        .transpose()?;

    let timeout = raw.timeout.map(timeout_duration).transpose()?;

    Ok(ConfigHeader {
        min_version,
        max_version,
        shell,
        timeout,
    })
}

fn timeout_duration(secs: f64) -> Result<Duration> {
    if !(secs.is_finite() && secs > 0.0) {
        return invalid("pyss.timeout", "must be a positive number of seconds");
    }
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        Ok(_) => invalid("pyss.timeout", "must be at least one nanosecond"),
        Err(_) => invalid("pyss.timeout", format!("{secs} seconds is too large")),
    }
}

fn version(value: &str, loc: &str) -> Result<semver::Version> {
    let message = || {
        format!("'{value}' is not a valid version format. Expected format: Major.Minor.Patch (e.g., 1.0.0)")
    };
    if !version_pattern().is_match(value) {
        return invalid(loc, message());
    }
    semver::Version::parse(value).or_else(|_| invalid(loc, message()))
}

fn env_map(raw: &RawEnv) -> EnvMap {
    raw.iter().map(|(k, v)| (k.clone(), v.to_string())).collect()
}

fn script_definition(raw: &RawScript, loc: &str) -> Result<ScriptDefinition> {
    if raw.name.trim().is_empty() {
        return invalid(&format!("{loc}.name"), "must not be empty");
    }
    let loc = format!("{loc} ('{}')", raw.name);

    if raw.description.is_none() && !raw.internal {
        return invalid(&loc, "'description' is a required property");
    }

    let body = match (&raw.command, &raw.commands) {
        (Some(_), Some(_)) => {
            return invalid(&loc, "'command' and 'commands' are mutually exclusive")
        }
        (None, None) => return invalid(&loc, "one of 'command' or 'commands' is required"),
        (Some(command), None) => ScriptBody::Single(command_spec(command, &format!("{loc}.command"))?),
        (None, Some(commands)) => {
            ScriptBody::Sequence(command_list(commands, &format!("{loc}.commands"))?)
        }
    };

    let mut definition = ScriptDefinition::new(raw.name.clone(), body)
        .internal(raw.internal)
        .env(env_map(&raw.env));
    if let Some(description) = &raw.description {
        definition = definition.description(description.clone());
    }
    if let Some(value) = &raw.shell {
        definition = definition.shell(shell(value, &format!("{loc}.shell"))?);
    }
    if let Some(value) = &raw.before {
        definition = definition.before(dependencies(value, &format!("{loc}.before"))?);
    }
    if let Some(value) = &raw.after {
        definition = definition.after(dependencies(value, &format!("{loc}.after"))?);
    }
    Ok(definition)
}

fn shell(value: &Value, loc: &str) -> Result<ShellSpec> {
    match value {
        Value::String(s) if s.trim().is_empty() => invalid(loc, "shell must not be empty"),
        Value::String(s) => Ok(ShellSpec::Literal(s.clone())),
        Value::Mapping(map) => {
            if map.is_empty() {
                return invalid(loc, "shell map must name at least one platform");
            }
            let mut variants = BTreeMap::new();
            for (key, shell) in map {
                let key = mapping_key(key, loc)?;
                let entry_loc = format!("{loc}.{key}");
                if !Platform::is_variant_key(&key) {
                    return invalid(&entry_loc, unknown_platform(&key, false));
                }
                variants.insert(key, non_empty_string(shell, &entry_loc)?);
            }
            Ok(ShellSpec::PlatformMap(variants))
        }
        _ => invalid(loc, "must be a string or a map of platform names to shells"),
    }
}

fn command_spec(value: &Value, loc: &str) -> Result<CommandSpec> {
    match value {
        Value::String(_) => Ok(CommandSpec::Literal(non_empty_string(value, loc)?)),
        Value::Mapping(map) => {
            let mut variants = BTreeMap::new();
            let mut fallback = None;
            let mut shell_spec = None;
            for (key, entry) in map {
                let key = mapping_key(key, loc)?;
                let entry_loc = format!("{loc}.{key}");
                match key.as_str() {
                    "cmd" => fallback = Some(non_empty_string(entry, &entry_loc)?),
                    "shell" => shell_spec = Some(shell(entry, &entry_loc)?),
                    platform if Platform::is_variant_key(platform) => {
                        variants.insert(key.clone(), non_empty_string(entry, &entry_loc)?);
                    }
                    _ => return invalid(&entry_loc, unknown_platform(&key, true)),
                }
            }
            if variants.is_empty() && fallback.is_none() {
                return invalid(loc, "command map needs at least one platform entry or 'cmd'");
            }
            Ok(CommandSpec::PlatformMap {
                variants,
                fallback,
                shell: shell_spec,
            })
        }
        _ => invalid(loc, "must be a string or a map of platform names to commands"),
    }
}

fn command_list(values: &[Value], loc: &str) -> Result<Vec<CommandSpec>> {
    if values.is_empty() {
        return invalid(loc, "must not be empty");
    }
    values
        .iter()
        .enumerate()
        .map(|(i, v)| command_spec(v, &format!("{loc}[{i}]")))
        .collect()
}

fn dependencies(value: &Value, loc: &str) -> Result<DependencySpec> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| dependency(item, &format!("{loc}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(DependencySpec::Sequence),
        _ => dependency(value, loc).map(DependencySpec::Single),
    }
}

fn dependency(value: &Value, loc: &str) -> Result<Dependency> {
    match value {
        Value::String(_) => Ok(Dependency::Shorthand(non_empty_string(value, loc)?)),
        Value::Mapping(map) => detailed_dependency(map, loc).map(Dependency::Detailed),
        _ => invalid(loc, "must be a script name, a command, or a dependency map"),
    }
}

fn detailed_dependency(map: &Mapping, loc: &str) -> Result<DetailedDependency> {
    let mut actions = Vec::new();
    let mut env = EnvMap::new();
    let mut silent = None;

    for (key, entry) in map {
        let key = mapping_key(key, loc)?;
        let entry_loc = format!("{loc}.{key}");
        match key.as_str() {
            "script" => actions.push(DependencyAction::Script(non_empty_string(
                entry, &entry_loc,
            )?)),
            "command" => actions.push(DependencyAction::Command(command_spec(entry, &entry_loc)?)),
            "commands" => match entry {
                Value::Sequence(items) => {
                    actions.push(DependencyAction::Commands(command_list(items, &entry_loc)?))
                }
                _ => return invalid(&entry_loc, "must be a list of commands"),
            },
            "env" => {
                let raw: RawEnv = serde_yaml::from_value(entry.clone()).or_else(|e| {
                    invalid(&entry_loc, format!("must be a map of scalar values ({e})"))
                })?;
                env = env_map(&raw);
            }
            "silent" => match entry {
                Value::Bool(b) => silent = Some(*b),
                _ => return invalid(&entry_loc, "must be true or false"),
            },
            other => log::warn!("{loc}: ignoring unknown key '{other}'"),
        }
    }

    if actions.len() != 1 {
        return invalid(
            loc,
            "dependency must have exactly one of 'script', 'command' or 'commands'",
        );
    }
    let action = actions.remove(0);

    let mut dependency = DetailedDependency::new(action).with_env(env);
    if let Some(silent) = silent {
        dependency = dependency.with_silent(silent);
    }
    Ok(dependency)
}

fn mapping_key(key: &Value, loc: &str) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        _ => invalid(loc, "map keys must be strings"),
    }
}

fn non_empty_string(value: &Value, loc: &str) -> Result<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => invalid(loc, "must not be empty"),
        _ => invalid(loc, "must be a string"),
    }
}

fn unknown_platform(key: &str, command_map: bool) -> String {
    let known: Vec<&str> = Platform::ALL
        .iter()
        .map(|p| p.key())
        .chain(FAMILY_KEYS)
        .collect();
    let extra = if command_map { ", 'cmd' or 'shell'" } else { "" };
    format!(
        "'{key}' is not a known platform (expected one of {}{extra})",
        known.join(", ")
    )
}
