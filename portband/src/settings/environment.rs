//! Environment variable handling for settings overrides.
//!
//! `PORTBAND_*` variables override values from the settings file.

use std::env;

use clap::ValueEnum;

use crate::confirm::OnConflict;
use crate::error::{Error, Result};
use crate::settings::schema::Settings;
use crate::validation::ConflictScope;

/// Lower band bound override.
pub const BAND_MIN_ENV: &str = "PORTBAND_BAND_MIN";
/// Upper band bound override.
pub const BAND_MAX_ENV: &str = "PORTBAND_BAND_MAX";
/// Comma-separated secret key list override.
pub const SECRET_KEYS_ENV: &str = "PORTBAND_SECRET_KEYS";
/// Conflict scope override.
pub const CONFLICT_SCOPE_ENV: &str = "PORTBAND_CONFLICT_SCOPE";
/// Disable live probing.
pub const SKIP_OCCUPANCY_ENV: &str = "PORTBAND_SKIP_OCCUPANCY_CHECK";
/// Probe all interfaces.
pub const CHECK_ALL_INTERFACES_ENV: &str = "PORTBAND_CHECK_ALL_INTERFACES";
/// Confirmation policy override.
pub const ON_CONFLICT_ENV: &str = "PORTBAND_ON_CONFLICT";

/// Handles environment variable overrides for settings.
///
/// # Examples
///
/// ```no_run
/// use portband::settings::{EnvironmentSettings, Settings};
///
/// let mut settings = Settings::default();
/// EnvironmentSettings::apply_overrides(&mut settings).unwrap();
/// ```
pub struct EnvironmentSettings;

impl EnvironmentSettings {
    /// Apply `PORTBAND_*` overrides to `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds a value of the wrong shape
    /// (non-numeric bound, unknown scope, invalid boolean).
    pub fn apply_overrides(settings: &mut Settings) -> Result<()> {
        if let Ok(min) = env::var(BAND_MIN_ENV) {
            settings.band.min = Self::parse_port(BAND_MIN_ENV, &min)?;
        }

        if let Ok(max) = env::var(BAND_MAX_ENV) {
            settings.band.max = Self::parse_port(BAND_MAX_ENV, &max)?;
        }

        if let Ok(keys) = env::var(SECRET_KEYS_ENV) {
            settings.secret_keys = Self::parse_list(&keys);
        }

        if let Ok(scope) = env::var(CONFLICT_SCOPE_ENV) {
            settings.conflict_scope = Self::parse_enum::<ConflictScope>(CONFLICT_SCOPE_ENV, &scope)?;
        }

        if let Ok(val) = env::var(SKIP_OCCUPANCY_ENV) {
            settings.occupancy.skip = Self::parse_bool(SKIP_OCCUPANCY_ENV, &val)?;
        }

        if let Ok(val) = env::var(CHECK_ALL_INTERFACES_ENV) {
            settings.occupancy.check_all_interfaces =
                Self::parse_bool(CHECK_ALL_INTERFACES_ENV, &val)?;
        }

        if let Ok(policy) = env::var(ON_CONFLICT_ENV) {
            settings.on_conflict = Some(Self::parse_enum::<OnConflict>(ON_CONFLICT_ENV, &policy)?);
        }

        Ok(())
    }

    /// Parse a boolean value.
    ///
    /// Accepts `true/false`, `1/0`, `yes/no`, `on/off` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error for anything else.
    pub fn parse_bool(field: &str, value: &str) -> Result<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("invalid boolean value '{value}'"),
            }),
        }
    }

    fn parse_port(field: &str, value: &str) -> Result<u16> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("invalid port number '{value}'"),
        })
    }

    fn parse_list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parse_enum<T: ValueEnum>(field: &str, value: &str) -> Result<T> {
        T::from_str(value.trim(), true).map_err(|message| Error::Validation {
            field: field.into(),
            message,
        })
    }
}
