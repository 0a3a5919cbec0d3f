//! Command to validate a port configuration.

use crate::error::CliError;
use crate::utils::{load_options, resolve_settings, GlobalOptions};
use clap::{Args, ValueEnum};
use portband::operations::validate_only;
use portband::output::{render_validation, validation_json};
use portband::SystemProbe;
use std::path::PathBuf;

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable lines
    Human,
    /// JSON document
    Json,
}

/// Validate a port configuration.
#[derive(Args)]
pub struct ValidateCommand {
    /// Port configuration file
    #[arg(value_name = "CONFIG", env = "PORTBAND_CONFIG", default_value = crate::utils::DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    pub format: ReportFormat,

    /// Fail when a port could not be checked
    #[arg(long)]
    pub fail_on_unknown: bool,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = resolve_settings(global)?;
        let options = load_options(&self.config, &settings, global);
        let validation = settings
            .validation_options()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let outcome = validate_only(&options, validation, &SystemProbe)?;

        match self.format {
            ReportFormat::Human => println!(
                "{}",
                render_validation(&outcome, self.fail_on_unknown, global.strict)
            ),
            ReportFormat::Json => println!(
                "{}",
                validation_json(&outcome, self.fail_on_unknown, global.strict)?
            ),
        }

        if outcome.passed(self.fail_on_unknown, global.strict) {
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "validation failed with {} finding(s)",
                outcome.failure_count(self.fail_on_unknown, global.strict)
            )))
        }
    }
}
