//! Classified configuration entries.

use serde::Serialize;

use super::classifier::{port_number, EntryKind, TypeClassifier};
use super::parser::{ParsedConfig, RawEntry};

/// Placeholder shown instead of a non-empty secret value.
pub const REDACTED_SET: &str = "<set>";

/// Placeholder shown instead of an empty secret value.
pub const REDACTED_UNSET: &str = "<unset>";

/// A classified `key: value` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    key: String,
    raw_value: String,
    kind: EntryKind,
    line: usize,
}

impl ConfigEntry {
    /// Classify a raw entry.
    #[must_use]
    pub fn classify(raw: RawEntry, classifier: &TypeClassifier) -> Self {
        let kind = classifier.classify(&raw.key, &raw.value);
        Self {
            key: raw.key,
            raw_value: raw.value,
            kind,
            line: raw.line,
        }
    }

    /// The entry key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The quote-stripped value, unredacted.
    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// The derived kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// 1-based source line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Numeric value for `Port` entries.
    #[must_use]
    pub fn port_number(&self) -> Option<u64> {
        match self.kind {
            EntryKind::Port => port_number(&self.raw_value),
            EntryKind::Secret | EntryKind::Unclassified => None,
        }
    }

    /// The value as it may appear in any human or report output.
    ///
    /// Secrets never show their value; they only indicate presence.
    ///
    /// # Examples
    ///
    /// ```
    /// use portband::config::{Configuration, ConfigParser, TypeClassifier};
    ///
    /// let parsed = ConfigParser::default().parse_str("nvidia_api_key: \"abc123\"\n");
    /// let config = Configuration::from_parsed(parsed, &TypeClassifier::default());
    /// let entry = config.get("nvidia_api_key").unwrap();
    /// assert_eq!(entry.raw_value(), "abc123");
    /// assert_eq!(entry.display_value(), "<set>");
    /// ```
    #[must_use]
    pub fn display_value(&self) -> &str {
        match self.kind {
            EntryKind::Secret if self.raw_value.is_empty() => REDACTED_UNSET,
            EntryKind::Secret => REDACTED_SET,
            EntryKind::Port | EntryKind::Unclassified => &self.raw_value,
        }
    }
}

/// Redacted view of an entry for serialized output.
#[derive(Debug, Clone, Serialize)]
pub struct EntryView<'a> {
    /// Entry key.
    pub key: &'a str,
    /// Redacted value.
    pub value: &'a str,
    /// Entry kind.
    pub kind: EntryKind,
}

impl<'a> From<&'a ConfigEntry> for EntryView<'a> {
    fn from(entry: &'a ConfigEntry) -> Self {
        Self {
            key: entry.key(),
            value: entry.display_value(),
            kind: entry.kind(),
        }
    }
}

/// An ordered, classified configuration with unique keys.
///
/// Built fresh for every run and not mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    entries: Vec<ConfigEntry>,
}

impl Configuration {
    /// Classify every parsed entry, keeping order.
    #[must_use]
    pub fn from_parsed(parsed: ParsedConfig, classifier: &TypeClassifier) -> Self {
        Self {
            entries: parsed
                .entries
                .into_iter()
                .map(|raw| ConfigEntry::classify(raw, classifier))
                .collect(),
        }
    }

    /// All entries in order.
    #[must_use]
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigEntry> {
        self.entries.iter()
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// `Port` entries paired with their numeric value, in order.
    pub fn ports(&self) -> impl Iterator<Item = (&ConfigEntry, u64)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.port_number().map(|value| (entry, value)))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Configuration {
    type Item = &'a ConfigEntry;
    type IntoIter = std::slice::Iter<'a, ConfigEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
