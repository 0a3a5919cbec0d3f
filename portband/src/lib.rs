#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # portband
//!
//! A library for loading, validating and exporting service port
//! configurations.
//!
//! A port configuration is a plain `key: value` file. Each value is
//! classified as a port, a secret or something else; ports are checked
//! against an accepted band, for structural duplicates, and for live
//! conflicts on the host. The entries are then published as environment
//! variables for downstream tooling.
//!
//! ## Core Types
//!
//! - [`Port`] and [`PortBand`]: Port number and accepted range
//! - [`Configuration`]: Ordered, classified entries
//! - [`ValidationReport`]: Band, duplicate and live findings
//! - [`ExportMap`]: Variables to publish
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use portband::config::{ConfigParser, Configuration, TypeClassifier};
//! use portband::port::probe::StaticProbe;
//! use portband::validation::{ValidationOptions, Validator};
//! use portband::ExportMap;
//!
//! let parsed = ConfigParser::default().parse_str("arangodb: 15001\nollama: 9999\n");
//! let config = Configuration::from_parsed(parsed, &TypeClassifier::default());
//!
//! let report = Validator::new(ValidationOptions::default(), &StaticProbe::empty())
//!     .validate(&config);
//! assert_eq!(report.out_of_range.len(), 1);
//!
//! // Validation is advisory: every entry is still exported.
//! let exports = ExportMap::from_configuration(&config);
//! assert_eq!(exports.get("ollama"), Some("9999"));
//! ```

pub mod config;
pub mod confirm;
pub mod error;
pub mod export;
pub mod logging;
pub mod operations;
pub mod output;
pub mod port;
pub mod settings;
pub mod validation;

// Re-export key types at crate root for convenience
pub use config::{ConfigEntry, Configuration, EntryKind};
pub use confirm::{ConfirmationPolicy, Decision, OnConflict};
pub use error::{Error, Result};
pub use export::ExportMap;
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    compliance_report, load_and_export, validate_only, ComplianceSummary, ExportOutcome,
    LoadOptions, ValidationOutcome,
};
pub use port::probe::{PortProbe, ProbeStatus, SystemProbe};
pub use port::{Port, PortBand};
pub use settings::Settings;
pub use validation::{ConflictScope, ValidationReport};
