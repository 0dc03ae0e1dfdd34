//! Configuration module for pyss.
//!
//! Finds `pyss.yaml`, parses it and validates it into a
//! [`ScriptTable`](crate::scripts::ScriptTable):
//! - `--file <PATH>` when given
//! - otherwise `pyss.yaml` / `pyss.yml` in the current or a parent directory

pub mod file;
mod types;
mod validate;

pub use file::{check_version, current_version, load_config, load_scripts};
pub use types::{EnvValue, RawConfig, RawEnv, RawHeader, RawScript};
pub use validate::{validate, ValidationError};
