//! Export map and its boundary adapters.
//!
//! [`ExportMap`] is the pure result of an export: an ordered list of
//! `key -> value` pairs. Publishing it is left to the adapters at the edge
//! of the program: the current process environment, a child
//! [`Command`], or rendered text through [`crate::output`].

use std::process::Command;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::Configuration;

/// Ordered variables to publish.
///
/// Every entry is exported with its quote-stripped value, whatever the
/// validation found. Secret values are exported unredacted; only reports
/// redact them.
///
/// # Examples
///
/// ```
/// use portband::config::{ConfigParser, Configuration, TypeClassifier};
/// use portband::export::ExportMap;
///
/// let parsed = ConfigParser::default().parse_str("arangodb: 15001\nnvidia_api_key: \"abc123\"\n");
/// let config = Configuration::from_parsed(parsed, &TypeClassifier::default());
///
/// let exports = ExportMap::from_configuration(&config);
/// assert_eq!(exports.get("nvidia_api_key"), Some("abc123"));
/// assert_eq!(exports.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportMap {
    vars: Vec<(String, String)>,
}

impl ExportMap {
    /// Build the map from every entry of `config`, in order.
    #[must_use]
    pub fn from_configuration(config: &Configuration) -> Self {
        Self {
            vars: config
                .iter()
                .map(|entry| (entry.key().to_string(), entry.raw_value().to_string()))
                .collect(),
        }
    }

    /// Iterate `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if there is nothing to export.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Set every variable in the current process environment.
    ///
    /// Must run before other threads are spawned; the environment is
    /// process-global.
    pub fn apply_to_process(&self) {
        for (key, value) in self.iter() {
            std::env::set_var(key, value);
        }
        log::debug!("exported {} variable(s) to the process environment", self.len());
    }

    /// Set every variable on a child command.
    pub fn apply_to_command<'c>(&self, command: &'c mut Command) -> &'c mut Command {
        command.envs(self.iter())
    }
}

impl Serialize for ExportMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.vars.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
