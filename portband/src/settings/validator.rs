//! Settings validation.

use std::collections::HashSet;

use crate::config::is_valid_key;
use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Validates merged settings before a run.
///
/// # Examples
///
/// ```
/// use portband::settings::{Settings, SettingsValidator};
///
/// SettingsValidator::validate(&Settings::default()).unwrap();
/// ```
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero or inverted band, or for a
    /// secret key that is empty, not a valid variable name, or repeated.
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.band.min == 0 {
            return Err(Error::Validation {
                field: "band.min".into(),
                message: "must be greater than 0".into(),
            });
        }
        settings.port_band()?;

        let mut seen = HashSet::new();
        for key in &settings.secret_keys {
            if !is_valid_key(key) {
                return Err(Error::Validation {
                    field: "secret_keys".into(),
                    message: format!("'{key}' is not a valid key name"),
                });
            }
            if !seen.insert(key.to_ascii_lowercase()) {
                return Err(Error::Validation {
                    field: "secret_keys".into(),
                    message: format!("'{key}' is listed more than once"),
                });
            }
        }

        Ok(())
    }
}
