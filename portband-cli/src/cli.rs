//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, LoadCommand, ReportCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use portband::validation::ConflictScope;
use std::path::PathBuf;

/// Command-line tool for validating and exporting service port configuration.
#[derive(Parser)]
#[command(name = "portband")]
#[command(version, about = "Validate and export service port configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Settings file to use instead of ~/.portband/settings.yaml
    #[arg(long, value_name = "PATH", global = true, env = "PORTBAND_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Report lines that could not be parsed; validate fails on them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Ignore variables already set in the environment
    #[arg(long, global = true)]
    pub ignore_env: bool,

    /// Which ports take part in duplicate and live checks
    #[arg(long, value_enum, value_name = "SCOPE", global = true)]
    pub scope: Option<ConflictScope>,

    /// Accepted port band
    #[arg(long, value_name = "MIN-MAX", global = true, value_parser = parse_band)]
    pub band: Option<BandArg>,

    /// Skip the live port check
    #[arg(long, global = true)]
    pub no_live_check: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Load a port configuration and export it
    Load(LoadCommand),

    /// Validate a port configuration
    Validate(ValidateCommand),

    /// Summarize band compliance of a port configuration
    Report(ReportCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

/// A `MIN-MAX` band given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandArg {
    /// Lower bound.
    pub min: u16,
    /// Upper bound.
    pub max: u16,
}

/// Parse a `MIN-MAX` band argument.
pub fn parse_band(s: &str) -> Result<BandArg, String> {
    let (min, max) = s
        .split_once('-')
        .ok_or_else(|| format!("expected MIN-MAX, got '{s}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u16>()
            .map_err(|_| format!("'{part}' is not a port number"))
    };
    Ok(BandArg {
        min: parse(min)?,
        max: parse(max)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_band() {
        assert_eq!(
            parse_band("12000-13000").unwrap(),
            BandArg {
                min: 12000,
                max: 13000
            }
        );
        assert!(parse_band("12000").is_err());
        assert!(parse_band("a-b").is_err());
        assert!(parse_band("1-70000").is_err());
    }

    #[test]
    fn test_load_with_trailing_command() {
        let cli = Cli::parse_from(["portband", "load", "demo.yaml", "--", "env", "-0"]);
        match cli.command {
            Command::Load(cmd) => {
                assert_eq!(cmd.config, PathBuf::from("demo.yaml"));
                assert_eq!(cmd.command, vec!["env", "-0"]);
            }
            _ => panic!("expected load"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["portband", "validate", "--scope", "all", "--band", "1-2"]);
        assert_eq!(cli.scope, Some(ConflictScope::All));
        assert_eq!(cli.band, Some(BandArg { min: 1, max: 2 }));
    }
}
