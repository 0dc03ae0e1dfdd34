//! Raw `pyss.yaml` document as deserialized by serde.
//!
//! Parts whose shape varies (commands, shells, dependencies) stay as
//! [`serde_yaml::Value`] and are decoded by [`super::validate`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_yaml::Value;

/// Top-level document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    /// `pyss:` may be present but empty.
    #[serde(default)]
    pub pyss: Option<RawHeader>,
    #[serde(default)]
    pub env: Option<RawEnv>,
    pub scripts: Vec<RawScript>,
}

/// The `pyss:` header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHeader {
    #[serde(default)]
    pub min_version: Option<String>,
    #[serde(default)]
    pub max_version: Option<String>,
    #[serde(default)]
    pub shell: Option<Value>,
    /// Seconds; fractions allowed.
    #[serde(default)]
    pub timeout: Option<f64>,
}

/// One entry of `scripts:`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScript {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub env: RawEnv,
    #[serde(default)]
    pub shell: Option<Value>,
    #[serde(default)]
    pub before: Option<Value>,
    #[serde(default)]
    pub after: Option<Value>,
    #[serde(default)]
    pub command: Option<Value>,
    #[serde(default)]
    pub commands: Option<Vec<Value>>,
}

/// Environment block; values may be any scalar.
pub type RawEnv = BTreeMap<String, EnvValue>;

/// A scalar environment value, stringified before use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Bool(b) => write!(f, "{b}"),
            EnvValue::Integer(i) => write!(f, "{i}"),
            EnvValue::Float(x) => write!(f, "{x}"),
            EnvValue::String(s) => f.write_str(s),
        }
    }
}
