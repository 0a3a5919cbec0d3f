//! Command to summarize band compliance.

use super::validate::ReportFormat;
use crate::error::CliError;
use crate::utils::{load_options, resolve_settings, GlobalOptions};
use clap::Args;
use portband::operations::compliance_report;
use portband::output::{compliance_json, render_compliance};
use portband::SystemProbe;
use std::path::PathBuf;

/// Summarize band compliance of a port configuration.
///
/// Findings never change the exit status; only a missing or unreadable
/// file does.
#[derive(Args)]
pub struct ReportCommand {
    /// Port configuration file
    #[arg(value_name = "CONFIG", env = "PORTBAND_CONFIG", default_value = crate::utils::DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    pub format: ReportFormat,
}

impl ReportCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = resolve_settings(global)?;
        let options = load_options(&self.config, &settings, global);
        let validation = settings
            .validation_options()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let summary = compliance_report(&options, validation, &SystemProbe)?;

        match self.format {
            ReportFormat::Human => println!("{}", render_compliance(&summary)),
            ReportFormat::Json => println!("{}", compliance_json(&summary)?),
        }
        Ok(())
    }
}
