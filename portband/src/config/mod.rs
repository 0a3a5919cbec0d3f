//! Port configuration loading.
//!
//! A port configuration is a line-oriented text file of `key: value`
//! entries:
//!
//! ```text
//! # comment
//! arangodb: 15001
//! nvidia_api_key: "abc123"
//! ```
//!
//! Loading happens in two steps. [`ConfigParser`] turns text into ordered
//! [`RawEntry`] values, tolerating comments, blank lines and malformed
//! lines. [`Configuration::from_parsed`] then runs each entry through the
//! [`TypeClassifier`] to tell ports, secrets and everything else apart.
//! Operator overrides from the environment are applied between the two
//! steps with [`ParsedConfig::apply_overrides`].
//!
//! # Examples
//!
//! ```
//! use portband::config::{ConfigParser, Configuration, EntryKind, TypeClassifier};
//!
//! let parsed = ConfigParser::default().parse_str("arangodb: 15001\n");
//! let config = Configuration::from_parsed(parsed, &TypeClassifier::default());
//! assert_eq!(config.get("arangodb").unwrap().kind(), EntryKind::Port);
//! ```

pub mod classifier;
pub mod entry;
pub mod parser;

#[cfg(test)]
mod proptests;

pub use classifier::{is_port_literal, port_number, EntryKind, TypeClassifier, DEFAULT_SECRET_KEYS};
pub use entry::{ConfigEntry, Configuration, EntryView, REDACTED_SET, REDACTED_UNSET};
pub use parser::{
    is_valid_key, ConfigParser, DuplicateKeyPolicy, ParseOptions, ParseWarning, ParsedConfig,
    QuoteMode, RawEntry, WarningKind,
};
