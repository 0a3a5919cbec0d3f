//! Load command implementation.
//!
//! Loads a port configuration, checks it, and publishes it. A process
//! cannot change its parent shell's environment, so without a trailing
//! command the variables are printed for the shell to evaluate:
//!
//! ```text
//! eval "$(portband load)"
//! portband load -- docker compose up -d
//! ```

use crate::error::CliError;
use crate::utils::{default_on_conflict, load_options, resolve_settings, GlobalOptions};
use clap::{Args, ValueEnum};
use portband::operations::load_and_export;
use portband::output::{render_summary_table, render_warnings, ExportFormat, ShellType};
use portband::{OnConflict, SystemProbe};
use std::path::PathBuf;
use std::process::Command;

/// Rendering of the exported variables on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoadFormat {
    /// Shell export statements
    Export,
    /// Dotenv lines
    Dotenv,
    /// JSON object
    Json,
}

/// Load a port configuration and export it.
#[derive(Args)]
pub struct LoadCommand {
    /// Port configuration file
    #[arg(value_name = "CONFIG", env = "PORTBAND_CONFIG", default_value = crate::utils::DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Output format for the exported variables
    #[arg(long, value_enum, default_value_t = LoadFormat::Export)]
    pub format: LoadFormat,

    /// Shell syntax for export statements (bash, zsh, fish, powershell)
    #[arg(long, value_name = "SHELL")]
    pub shell: Option<String>,

    /// Continue without asking when ports are already in use
    #[arg(long, short = 'y', conflicts_with = "on_conflict")]
    pub yes: bool,

    /// What to do when ports are already in use
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_conflict: Option<OnConflict>,

    /// Command to run with the exported environment
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl LoadCommand {
    /// Execute the load command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = resolve_settings(global)?;
        let options = load_options(&self.config, &settings, global);
        let validation = settings
            .validation_options()
            .map_err(|e| CliError::Config(e.to_string()))?;

        // Flag > settings > terminal-dependent default
        let on_conflict = if self.yes {
            OnConflict::Continue
        } else {
            self.on_conflict
                .or(settings.on_conflict)
                .unwrap_or_else(default_on_conflict)
        };
        let mut policy = on_conflict.into_policy();

        let outcome = load_and_export(&options, validation, &SystemProbe, policy.as_mut())?;

        if !global.quiet {
            eprintln!("{}", render_summary_table(&outcome.loaded.configuration));
            if global.strict && !outcome.loaded.warnings.is_empty() {
                eprintln!("{}", render_warnings(&outcome.loaded.warnings));
            }
        }

        if let Some((program, args)) = self.command.split_first() {
            let mut child = Command::new(program);
            child.args(args);
            outcome.exports.apply_to_command(&mut child);
            let status = child.status()?;
            return match status.code() {
                Some(0) => Ok(()),
                Some(code) => Err(CliError::ChildExit(code)),
                None => Err(CliError::ChildExit(1)),
            };
        }

        let format = match self.format {
            LoadFormat::Export => {
                let shell = match &self.shell {
                    Some(name) => ShellType::from_string(name)
                        .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
                    None => ShellType::detect(),
                };
                ExportFormat::Export(shell)
            }
            LoadFormat::Dotenv => ExportFormat::Dotenv,
            LoadFormat::Json => ExportFormat::Json,
        };

        let rendered = format.create_formatter().format(&outcome.exports)?;
        if !rendered.is_empty() {
            println!("{rendered}");
        }
        Ok(())
    }
}
