//! Script model for pyss.
//!
//! The typed form of `pyss.yaml`: scripts, command variants, dependencies
//! and the platform identifiers they are keyed by.

mod platform;
mod types;

pub use platform::{Platform, FAMILY_KEYS};
pub use types::{
    list_scripts, CommandSpec, ConfigDocument, ConfigHeader, Dependency, DependencyAction,
    DependencySpec, DetailedDependency, EnvMap, ScriptBody, ScriptDefinition, ScriptTable,
    ShellSpec, DEFAULT_TIMEOUT,
};
