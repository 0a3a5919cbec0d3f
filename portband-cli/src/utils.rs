//! Utility functions for CLI operations.
//!
//! This module provides the global options shared by every command and the
//! helpers that turn them into library settings and load options.

use crate::cli::BandArg;
use crate::error::CliError;
use portband::operations::{LoadOptions, Preseed};
use portband::settings::{self, Settings, SettingsValidator};
use portband::validation::ConflictScope;
use portband::OnConflict;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Configuration file used when neither an argument nor `PORTBAND_CONFIG`
/// names one.
pub const DEFAULT_CONFIG: &str = "ports.yaml";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit settings file.
    pub settings: Option<PathBuf>,

    /// Report skipped lines.
    pub strict: bool,

    /// Do not pre-seed values from the environment.
    pub ignore_env: bool,

    /// Conflict scope override.
    pub scope: Option<ConflictScope>,

    /// Band override.
    pub band: Option<BandArg>,

    /// Skip the live port check.
    pub no_live_check: bool,
}

/// Resolve settings from file and environment, then apply the global flags.
///
/// The priority order is:
/// 1. Global options
/// 2. `PORTBAND_*` environment variables
/// 3. The settings file
/// 4. Built-in defaults
pub fn resolve_settings(global: &GlobalOptions) -> Result<Settings, CliError> {
    let mut settings = settings::resolve(global.settings.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))?;

    if let Some(scope) = global.scope {
        settings.conflict_scope = scope;
    }
    if let Some(band) = global.band {
        settings.band.min = band.min;
        settings.band.max = band.max;
    }
    if global.no_live_check {
        settings.occupancy.skip = true;
    }

    SettingsValidator::validate(&settings).map_err(|e| CliError::Config(e.to_string()))?;
    Ok(settings)
}

/// Load options for `config` under `settings` and the global flags.
pub fn load_options(config: &Path, settings: &Settings, global: &GlobalOptions) -> LoadOptions {
    let preseed = if global.ignore_env {
        Preseed::Disabled
    } else {
        Preseed::ProcessEnv
    };
    LoadOptions::new(config, settings).with_preseed(preseed)
}

/// Confirmation policy when nothing was configured: ask on a terminal,
/// abort otherwise so unattended runs never block.
pub fn default_on_conflict() -> OnConflict {
    if std::io::stdin().is_terminal() {
        OnConflict::Ask
    } else {
        OnConflict::Abort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_options_respect_ignore_env() {
        let settings = Settings::default();
        let global = GlobalOptions {
            ignore_env: true,
            ..GlobalOptions::default()
        };
        let options = load_options(Path::new("ports.yaml"), &settings, &global);
        assert_eq!(options.preseed, Preseed::Disabled);

        let options = load_options(Path::new("ports.yaml"), &settings, &GlobalOptions::default());
        assert_eq!(options.preseed, Preseed::ProcessEnv);
    }

    #[test]
    fn test_flags_override_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "band: { min: 11000, max: 12000 }\n").unwrap();

        let global = GlobalOptions {
            settings: Some(path),
            band: Some(BandArg {
                min: 12000,
                max: 13000,
            }),
            scope: Some(ConflictScope::All),
            no_live_check: true,
            ..GlobalOptions::default()
        };
        let settings = resolve_settings(&global).unwrap();
        assert_eq!((settings.band.min, settings.band.max), (12000, 13000));
        assert_eq!(settings.conflict_scope, ConflictScope::All);
        assert!(settings.occupancy.skip);
    }

    #[test]
    fn test_inverted_band_flag_is_a_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "").unwrap();

        let global = GlobalOptions {
            settings: Some(path),
            band: Some(BandArg {
                min: 13000,
                max: 12000,
            }),
            ..GlobalOptions::default()
        };
        let err = resolve_settings(&global).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
