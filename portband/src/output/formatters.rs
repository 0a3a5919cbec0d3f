//! Export formatter implementations.

use crate::export::ExportMap;
use crate::Result;

use super::{OutputFormatter, ShellType};

/// Formatter for shell-specific export statements.
pub struct ExportFormatter {
    shell: ShellType,
}

impl ExportFormatter {
    /// Create a new export formatter for `shell`.
    #[must_use]
    pub const fn new(shell: ShellType) -> Self {
        Self { shell }
    }
}

impl OutputFormatter for ExportFormatter {
    fn format(&self, exports: &ExportMap) -> Result<String> {
        Ok(exports
            .iter()
            .map(|(key, value)| self.shell.format_export(key, value))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, exports: &ExportMap) -> Result<String> {
        Ok(serde_json::to_string_pretty(exports)?)
    }
}

/// Formatter for dotenv (.env file) format.
pub struct DotenvFormatter;

impl OutputFormatter for DotenvFormatter {
    fn format(&self, exports: &ExportMap) -> Result<String> {
        Ok(exports
            .iter()
            .map(|(key, value)| format!("{key}={}", dotenv_quote(value)))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn dotenv_quote(value: &str) -> String {
    let plain = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_-.,:/@%+".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('\\', r"\\").replace('"', "\\\""))
    }
}
