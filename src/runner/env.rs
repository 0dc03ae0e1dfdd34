//! Scoped environment variables.
//!
//! An [`EnvScope`] is a snapshot of the process environment with an overlay
//! of primed variables on top. Priming returns a child scope; dropping the
//! child is what clears its variables again. The process environment itself
//! is never touched.

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

/// Environment visible to a unit of work.
#[derive(Debug, Clone, Default)]
pub struct EnvScope {
    base: Arc<BTreeMap<String, String>>,
    overlay: BTreeMap<String, String>,
}

impl EnvScope {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        let base: BTreeMap<String, String> = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::with_base(base)
    }

    /// Scope over an explicit base environment.
    pub fn with_base(base: BTreeMap<String, String>) -> Self {
        Self {
            base: Arc::new(base),
            overlay: BTreeMap::new(),
        }
    }

    /// Scope with nothing set at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derive a child scope in which `vars` are set, overriding earlier values.
    pub fn prime<'a, I>(&self, vars: I) -> EnvScope
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut overlay = self.overlay.clone();
        for (key, value) in vars {
            log::trace!("prime {key}={value}");
            overlay.insert(key.clone(), value.clone());
        }
        EnvScope {
            base: Arc::clone(&self.base),
            overlay,
        }
    }

    /// Look up a variable, overlay first.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.overlay
            .get(name)
            .or_else(|| self.base.get(name))
            .map(String::as_str)
    }

    /// Check whether a variable is visible in this scope.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Variables primed on top of the inherited environment.
    ///
    /// This is what a child process receives in addition to what it inherits.
    pub fn overlay(&self) -> &BTreeMap<String, String> {
        &self.overlay
    }
}
