//! Output formatting.
//!
//! Export maps render as shell statements, dotenv lines or JSON through the
//! [`OutputFormatter`] trait. Reports on what was loaded and found render
//! through the functions re-exported from the `report` submodule; those
//! always redact secrets.

mod formatters;
mod report;
mod shell;

use crate::export::ExportMap;
use crate::Result;

pub use formatters::{DotenvFormatter, ExportFormatter, JsonFormatter};
pub use report::{
    compliance_json, render_compliance, render_summary_table, render_validation, render_warnings,
    validation_json,
};
pub use shell::ShellType;

/// Trait for rendering an export map.
pub trait OutputFormatter {
    /// Format the export map into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatting fails.
    fn format(&self, exports: &ExportMap) -> Result<String>;
}

/// Available output formats for an export map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Shell-specific export statements.
    Export(ShellType),
    /// Dotenv (.env file) format.
    Dotenv,
    /// JSON object.
    Json,
}

impl ExportFormat {
    /// Create a formatter for this output format.
    ///
    /// # Examples
    ///
    /// ```
    /// use portband::export::ExportMap;
    /// use portband::output::{ExportFormat, ShellType};
    ///
    /// let formatter = ExportFormat::Export(ShellType::Bash).create_formatter();
    /// assert_eq!(formatter.format(&ExportMap::default()).unwrap(), "");
    /// ```
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Export(shell) => Box::new(ExportFormatter::new(*shell)),
            Self::Dotenv => Box::new(DotenvFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}
