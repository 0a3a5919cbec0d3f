//! Line-oriented `key: value` parser.
//!
//! The format is deliberately lenient: comments, blank lines and any line
//! that does not look like an entry are skipped without failing the parse.
//! Every skipped line is still recorded as a [`ParseWarning`] so callers
//! that want a strict view can surface them.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::{REDACTED_SET, REDACTED_UNSET};
use crate::error::{Error, Result};

/// How enclosing double quotes are removed from a value.
///
/// Trailing quotes are always stripped and a lone leading quote is always
/// kept. The modes differ only for values wrapped in a quote pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteMode {
    /// `"abc"` becomes `abc`.
    #[default]
    Enclosing,
    /// `"abc"` becomes `"abc`: only the trailing side is touched.
    TrailingOnly,
}

/// Which occurrence of a repeated key supplies the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateKeyPolicy {
    /// A later occurrence replaces the value; the key keeps its first position.
    #[default]
    LastWins,
    /// Later occurrences are ignored.
    FirstWins,
}

/// Parser options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Quote stripping mode.
    pub quotes: QuoteMode,
    /// Repeated key handling.
    pub duplicate_keys: DuplicateKeyPolicy,
}

/// One `key: value` occurrence, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// The entry key.
    pub key: String,
    /// The value after quote stripping.
    pub value: String,
    /// 1-based line number the value came from.
    pub line: usize,
}

/// Why a line did not contribute an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// The line has no `:` separator or an empty key.
    Malformed,
    /// The key cannot be used as an environment variable name.
    InvalidKey,
    /// The key already appeared; see the duplicate key policy.
    RepeatedKey,
}

/// A line the parser skipped or that changed an earlier entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based line number.
    pub line: usize,
    /// The line as written, or `key: <set>` once redacted.
    pub text: String,
    /// The key the line names, when it has one.
    pub key: Option<String>,
    /// What happened to it.
    pub kind: WarningKind,
}

impl ParseWarning {
    /// The key this line is about: the parsed key, or else the first word
    /// of the text.
    #[must_use]
    pub fn subject(&self) -> &str {
        match &self.key {
            Some(key) => key.as_str(),
            None => self
                .text
                .trim()
                .split(|c: char| c == ':' || c.is_whitespace())
                .next()
                .unwrap_or_default(),
        }
    }

    /// Replace the text with `key: <set>` (or `<unset>` for an empty value).
    pub fn redact(&mut self) {
        let empty = self.text.split_once(':').is_some_and(|(_, value)| {
            value.trim().trim_matches('"').is_empty()
        });
        let placeholder = if empty { REDACTED_UNSET } else { REDACTED_SET };
        self.text = format!("{}: {placeholder}", self.subject());
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            WarningKind::Malformed => "not a `key: value` entry",
            WarningKind::InvalidKey => "key is not a valid variable name",
            WarningKind::RepeatedKey => "key repeated",
        };
        write!(f, "line {}: {what}: {}", self.line, self.text)
    }
}

/// Result of parsing a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    /// Entries in first-appearance order with unique keys.
    pub entries: Vec<RawEntry>,
    /// Lines that were skipped or repeated keys.
    pub warnings: Vec<ParseWarning>,
}

impl ParsedConfig {
    /// Replace values of keys that are already set by the operator.
    ///
    /// `lookup` is consulted for every key; a `Some` replaces the file value.
    /// Returns the keys that were overridden, in entry order.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overridden = Vec::new();
        for entry in &mut self.entries {
            if let Some(value) = lookup(&entry.key) {
                if value != entry.value {
                    log::debug!("{} pre-seeded from the environment", entry.key);
                }
                entry.value = value;
                overridden.push(entry.key.clone());
            }
        }
        overridden
    }

    /// Redact the text of every warning whose key is a secret.
    pub fn redact_warnings<F>(&mut self, is_secret: F)
    where
        F: Fn(&str) -> bool,
    {
        for warning in &mut self.warnings {
            if is_secret(warning.subject()) {
                warning.redact();
            }
        }
    }
}

/// Parser for `key: value` port configuration files.
///
/// # Examples
///
/// ```
/// use portband::config::ConfigParser;
///
/// let parsed = ConfigParser::default().parse_str(
///     "# services\narangodb: 15001\nnvidia_api_key: \"abc123\"\n",
/// );
/// assert_eq!(parsed.entries.len(), 2);
/// assert_eq!(parsed.entries[1].value, "abc123");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigParser {
    options: ParseOptions,
}

enum Line<'a> {
    Skip,
    Entry { key: &'a str, value: &'a str },
    Rejected {
        kind: WarningKind,
        key: Option<&'a str>,
    },
}

impl ConfigParser {
    /// Create a parser with the given options.
    #[must_use]
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Read and parse a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] when the file does not exist and
    /// [`Error::ConfigUnreadable`] when it cannot be read.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedConfig> {
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                Error::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::ConfigUnreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        log::debug!("read {} bytes from {}", contents.len(), path.display());
        Ok(self.parse_str(&contents))
    }

    /// Parse configuration text. Never fails; see the module docs.
    #[must_use]
    pub fn parse_str(&self, contents: &str) -> ParsedConfig {
        let mut parsed = ParsedConfig::default();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (index, text) in contents.lines().enumerate() {
            let line = index + 1;
            let (key, value) = match split_line(text) {
                Line::Skip => continue,
                Line::Rejected { kind, key } => {
                    parsed.warnings.push(ParseWarning {
                        line,
                        text: text.to_string(),
                        key: key.map(str::to_string),
                        kind,
                    });
                    continue;
                }
                Line::Entry { key, value } => (key, value),
            };

            let value = strip_quotes(value, self.options.quotes).to_string();

            if let Some(&position) = positions.get(key) {
                parsed.warnings.push(ParseWarning {
                    line,
                    text: text.to_string(),
                    key: Some(key.to_string()),
                    kind: WarningKind::RepeatedKey,
                });
                if self.options.duplicate_keys == DuplicateKeyPolicy::LastWins {
                    let existing = &mut parsed.entries[position];
                    existing.value = value;
                    existing.line = line;
                }
                continue;
            }

            positions.insert(key.to_string(), parsed.entries.len());
            parsed.entries.push(RawEntry {
                key: key.to_string(),
                value,
                line,
            });
        }

        parsed
    }
}

fn split_line(text: &str) -> Line<'_> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Skip;
    }

    let Some((key, rest)) = text.split_once(':') else {
        return Line::Rejected {
            kind: WarningKind::Malformed,
            key: None,
        };
    };

    let key = key.trim();
    if key.is_empty() {
        return Line::Rejected {
            kind: WarningKind::Malformed,
            key: None,
        };
    }
    if !is_valid_key(key) {
        return Line::Rejected {
            kind: WarningKind::InvalidKey,
            key: Some(key),
        };
    }

    let value = rest.strip_prefix(' ').unwrap_or(rest);
    Line::Entry { key, value }
}

/// Returns `true` if `key` can be exported as an environment variable.
///
/// Valid names start with a letter or underscore and contain only ASCII
/// letters, digits and underscores.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn strip_quotes(value: &str, mode: QuoteMode) -> &str {
    let stripped = value.trim_end_matches('"');
    if mode == QuoteMode::Enclosing && stripped.len() < value.len() {
        stripped.strip_prefix('"').unwrap_or(stripped)
    } else {
        stripped
    }
}
