//! Configuration lookup for modules.
//!
//! Modules read their options from a section path derived from the owning
//! server and the module name, e.g. `ns/server/s1/module/greeter`.
//! [`ConfigSet`] is the in-memory store the reference host serves lookups
//! from; it can be populated by hand or loaded from a TOML file whose tables
//! are the section paths:
//!
//! ```toml
//! ["ns/server/s1/module/greeter"]
//! greeting = "Hi"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::error::ConfigError;

/// Read-only access to host configuration.
pub trait ConfigSource: Send + Sync {
    /// Look up `key` in the section at `path`.
    fn get_value(&self, path: &str, key: &str) -> Option<String>;
}

/// Build the configuration section path of a module loaded into a server.
pub fn config_path(server: &str, module: &str) -> String {
    format!("ns/server/{server}/module/{module}")
}

/// Section path → key → value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSet {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct RawConfig(BTreeMap<String, toml::Table>);

impl ConfigSet {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` in the section at `path`, replacing any earlier value.
    pub fn set(
        &mut self,
        path: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.sections
            .entry(path.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Builder-style variant of [`ConfigSet::set`].
    pub fn with(
        mut self,
        path: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(path, key, value);
        self
    }

    /// Parse a TOML document. Scalars are stored in their string form;
    /// nested tables and arrays are skipped with a warning.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let RawConfig(raw) = toml::from_str(content)?;
        let mut config = Self::new();
        for (path, table) in raw {
            for (key, value) in table {
                match scalar_to_string(&value) {
                    Some(value) => config.set(path.clone(), key, value),
                    None => tracing::warn!("Ignoring non-scalar config value {path}/{key}"),
                }
            }
        }
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Names of all sections present.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

impl ConfigSource for ConfigSet {
    fn get_value(&self, path: &str, key: &str) -> Option<String> {
        self.sections.get(path)?.get(key).cloned()
    }
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}
