//! Schema-less classification of configuration values.

use std::collections::HashSet;

use serde::Serialize;

/// Secret-bearing keys recognized when settings do not supply a list.
pub const DEFAULT_SECRET_KEYS: &[&str] = &["nvidia_api_key", "hf_token"];

/// What a configuration value holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A numeric service port.
    Port,
    /// A value that must never be displayed.
    Secret,
    /// Anything else.
    Unclassified,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Port => write!(f, "port"),
            Self::Secret => write!(f, "secret"),
            Self::Unclassified => write!(f, "other"),
        }
    }
}

/// Derives an [`EntryKind`] from a key and its textual value.
///
/// Secret keys are matched case-insensitively and win over the numeric
/// rule, so a numeric token is still redacted.
///
/// # Examples
///
/// ```
/// use portband::config::{EntryKind, TypeClassifier};
///
/// let classifier = TypeClassifier::default();
/// assert_eq!(classifier.classify("arangodb", "15001"), EntryKind::Port);
/// assert_eq!(classifier.classify("nvidia_api_key", "abc123"), EntryKind::Secret);
/// assert_eq!(classifier.classify("app_host", "localhost"), EntryKind::Unclassified);
/// ```
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    secret_keys: HashSet<String>,
}

impl TypeClassifier {
    /// Create a classifier with the given secret key allow-list.
    pub fn new<I, S>(secret_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            secret_keys: secret_keys
                .into_iter()
                .map(|key| key.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Classify one entry.
    #[must_use]
    pub fn classify(&self, key: &str, value: &str) -> EntryKind {
        if self.is_secret_key(key) {
            EntryKind::Secret
        } else if is_port_literal(value) {
            EntryKind::Port
        } else {
            EntryKind::Unclassified
        }
    }

    /// Returns `true` if `key` is on the secret allow-list.
    #[must_use]
    pub fn is_secret_key(&self, key: &str) -> bool {
        self.secret_keys.contains(&key.to_ascii_lowercase())
    }
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET_KEYS)
    }
}

/// Returns `true` if `value` is a run of ASCII digits (`^[0-9]+$`).
///
/// Leading zeros are accepted; signs, whitespace and empty strings are not.
#[must_use]
pub fn is_port_literal(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Base-10 value of a port literal. Literals too large for `u64` saturate,
/// which keeps them outside any band.
#[must_use]
pub fn port_number(value: &str) -> Option<u64> {
    if !is_port_literal(value) {
        return None;
    }
    Some(value.parse().unwrap_or(u64::MAX))
}
