//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `load`: Load a port configuration and export it
//! - `validate`: Range, duplicate and live checks with pass/fail
//! - `report`: Band compliance counts
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod load;
pub mod report;
pub mod validate;

pub use completions::CompletionsCommand;
pub use load::LoadCommand;
pub use report::ReportCommand;
pub use validate::ValidateCommand;
