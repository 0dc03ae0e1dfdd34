//! Type definitions for the validated script table.
//!
//! These are produced once by [`crate::config`] and never change during a run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::slice;
use std::time::Duration;

/// Environment variables declared in the config (name -> value).
pub type EnvMap = BTreeMap<String, String>;

/// Default time a single command may run before it is killed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A shell override: one path for every platform, or one per platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellSpec {
    /// The same shell on every platform.
    Literal(String),
    /// Shell per platform key; platforms without an entry use the next default.
    PlatformMap(BTreeMap<String, String>),
}

/// A command description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// A plain command string.
    Literal(String),
    /// Per-platform variants with an optional `cmd` fallback and shell override.
    PlatformMap {
        variants: BTreeMap<String, String>,
        fallback: Option<String>,
        shell: Option<ShellSpec>,
    },
}

impl CommandSpec {
    /// Create a literal command.
    pub fn literal(command: impl Into<String>) -> Self {
        CommandSpec::Literal(command.into())
    }

    /// The shell override attached to this command, if any.
    pub fn shell(&self) -> Option<&ShellSpec> {
        match self {
            CommandSpec::Literal(_) => None,
            CommandSpec::PlatformMap { shell, .. } => shell.as_ref(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandSpec::Literal(command) => f.write_str(command),
            CommandSpec::PlatformMap {
                variants, fallback, ..
            } => {
                let mut parts: Vec<String> = variants
                    .iter()
                    .map(|(platform, command)| format!("{platform}: {command}"))
                    .collect();
                if let Some(cmd) = fallback {
                    parts.push(format!("cmd: {cmd}"));
                }
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

/// The main body of a script: `command` or `commands`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptBody {
    Single(CommandSpec),
    Sequence(Vec<CommandSpec>),
}

impl ScriptBody {
    /// The commands to run, in order.
    pub fn commands(&self) -> &[CommandSpec] {
        match self {
            ScriptBody::Single(command) => slice::from_ref(command),
            ScriptBody::Sequence(commands) => commands,
        }
    }
}

/// What a structured dependency does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyAction {
    /// Run another script from the table.
    Script(String),
    /// Run one inline command.
    Command(CommandSpec),
    /// Run several inline commands in order.
    Commands(Vec<CommandSpec>),
}

/// A structured dependency with its own scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedDependency {
    pub action: DependencyAction,
    /// Variables primed only while this dependency runs.
    pub env: EnvMap,
    /// Output override; `None` keeps the caller's policy.
    pub silent: Option<bool>,
}

impl DetailedDependency {
    /// Create a dependency without env or output override.
    pub fn new(action: DependencyAction) -> Self {
        Self {
            action,
            env: EnvMap::new(),
            silent: None,
        }
    }

    /// Set the scoped environment.
    pub fn with_env(mut self, env: EnvMap) -> Self {
        self.env = env;
        self
    }

    /// Set the output override.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = Some(silent);
        self
    }
}

/// A single before/after hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// A script name, or an inline command when no script has that name.
    Shorthand(String),
    Detailed(DetailedDependency),
}

/// A `before`/`after` hook: one dependency or a list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySpec {
    Single(Dependency),
    Sequence(Vec<Dependency>),
}

impl DependencySpec {
    /// The dependencies in execution order.
    pub fn as_slice(&self) -> &[Dependency] {
        match self {
            DependencySpec::Single(dependency) => slice::from_ref(dependency),
            DependencySpec::Sequence(dependencies) => dependencies,
        }
    }
}

/// A named script from `pyss.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDefinition {
    name: String,
    description: Option<String>,
    internal: bool,
    env: EnvMap,
    shell: Option<ShellSpec>,
    before: Option<DependencySpec>,
    after: Option<DependencySpec>,
    body: ScriptBody,
}

impl ScriptDefinition {
    /// Create a script with the given body and nothing else.
    pub fn new(name: impl Into<String>, body: ScriptBody) -> Self {
        Self {
            name: name.into(),
            description: None,
            internal: false,
            env: EnvMap::new(),
            shell: None,
            before: None,
            after: None,
            body,
        }
    }

    /// Create a script running a single literal command.
    pub fn with_command(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self::new(name, ScriptBody::Single(CommandSpec::literal(command)))
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn internal(mut self, internal: bool) -> Self {
        self.internal = internal;
        self
    }

    pub fn env(mut self, env: EnvMap) -> Self {
        self.env = env;
        self
    }

    pub fn shell(mut self, shell: ShellSpec) -> Self {
        self.shell = Some(shell);
        self
    }

    pub fn before(mut self, before: DependencySpec) -> Self {
        self.before = Some(before);
        self
    }

    pub fn after(mut self, after: DependencySpec) -> Self {
        self.after = Some(after);
        self
    }

    /// Get the script name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the script description.
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Check if the script is hidden and only usable as a dependency.
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// Variables scoped to this script's execution.
    pub fn get_env(&self) -> &EnvMap {
        &self.env
    }

    /// Script-level default shell.
    pub fn get_shell(&self) -> Option<&ShellSpec> {
        self.shell.as_ref()
    }

    pub fn get_before(&self) -> Option<&DependencySpec> {
        self.before.as_ref()
    }

    pub fn get_after(&self) -> Option<&DependencySpec> {
        self.after.as_ref()
    }

    /// The commands making up the script body.
    pub fn commands(&self) -> &[CommandSpec] {
        self.body.commands()
    }
}

/// Settings from the `pyss` header of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigHeader {
    pub min_version: Option<semver::Version>,
    pub max_version: Option<semver::Version>,
    /// Default shell for every command.
    pub shell: Option<ShellSpec>,
    /// Per-command time limit; `None` means [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
}

/// Everything about the config file that is not a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    location: PathBuf,
    header: ConfigHeader,
    env: EnvMap,
}

impl ConfigDocument {
    /// Create a document for a config file at `location`.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            header: ConfigHeader::default(),
            env: EnvMap::new(),
        }
    }

    pub fn with_header(mut self, header: ConfigHeader) -> Self {
        self.header = header;
        self
    }

    pub fn with_env(mut self, env: EnvMap) -> Self {
        self.env = env;
        self
    }

    /// Path of the config file.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Display name of the config file (e.g. `pyss.yaml`).
    pub fn file_name(&self) -> String {
        self.location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.location.display().to_string())
    }

    /// Directory every command runs in: the one holding the config file.
    pub fn working_dir(&self) -> &Path {
        match self.location.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn header(&self) -> &ConfigHeader {
        &self.header
    }

    /// Variables primed before any script runs.
    pub fn env(&self) -> &EnvMap {
        &self.env
    }

    /// Time limit for each command.
    pub fn timeout(&self) -> Duration {
        self.header.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}

/// Ordered collection of scripts from one config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTable {
    document: ConfigDocument,
    scripts: Vec<ScriptDefinition>,
}

impl ScriptTable {
    /// Create a table. Names are expected to be unique; the first match wins otherwise.
    pub fn new(document: ConfigDocument, scripts: Vec<ScriptDefinition>) -> Self {
        Self { document, scripts }
    }

    /// The config file the scripts came from.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Get a script by name.
    pub fn get(&self, name: &str) -> Option<&ScriptDefinition> {
        self.scripts.iter().find(|s| s.name == name)
    }

    /// Check whether a script with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get an iterator over the scripts.
    pub fn iter(&self) -> impl Iterator<Item = &ScriptDefinition> {
        self.scripts.iter()
    }

    /// Get the number of scripts.
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Names of the scripts that may be run directly.
    pub fn public_names(&self) -> Vec<&str> {
        self.scripts
            .iter()
            .filter(|s| !s.internal)
            .map(|s| s.name.as_str())
            .collect()
    }
}

/// List `(name, description)` for every non-internal script, in file order.
pub fn list_scripts(table: &ScriptTable) -> Vec<(&str, &str)> {
    table
        .iter()
        .filter(|s| !s.is_internal())
        .map(|s| (s.name(), s.get_description().unwrap_or_default()))
        .collect()
}
