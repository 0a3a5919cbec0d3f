//! The three run modes.
//!
//! Each mode is one load → validate cycle over a fresh configuration:
//!
//! - [`load_and_export`]: validate, pass the confirmation gate, and build an
//!   [`ExportMap`](crate::export::ExportMap) for the caller to publish.
//! - [`validate_only`]: validate and judge pass/fail.
//! - [`compliance_report`]: count findings. No side effects.
//!
//! Publishing the export map is left to the caller, since only the caller
//! knows whether it is setting up a child process or printing statements
//! for a shell to evaluate.
//!
//! # Examples
//!
//! ```no_run
//! use portband::confirm::AlwaysAbort;
//! use portband::operations::{load_and_export, LoadOptions};
//! use portband::port::probe::SystemProbe;
//! use portband::settings::Settings;
//!
//! let settings = Settings::default();
//! let options = LoadOptions::new("ports.yaml", &settings);
//! let outcome = load_and_export(
//!     &options,
//!     settings.validation_options().unwrap(),
//!     &SystemProbe,
//!     &mut AlwaysAbort,
//! )
//! .unwrap();
//! outcome.exports.apply_to_process();
//! ```

pub mod load;
pub mod report;
pub mod validate;

pub use load::{load_and_export, load_configuration, ExportOutcome, LoadOptions, LoadedConfig, Preseed};
pub use report::{compliance_report, ComplianceSummary};
pub use validate::{validate_only, Suggestion, ValidationOutcome};
