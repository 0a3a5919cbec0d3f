//! Tool settings.
//!
//! Settings decide how a port configuration is judged: the port band, the
//! secret key allow-list, the conflict scope and so on. They are merged from
//! several sources with the following precedence (highest to lowest):
//!
//! 1. Programmatic/CLI overrides
//! 2. Environment variables (`PORTBAND_*`)
//! 3. The settings file (`--settings PATH` or `~/.portband/settings.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use portband::settings::{Settings, SettingsValidator};
//!
//! let mut settings = Settings::default();
//! settings.band.min = 11000;
//! SettingsValidator::validate(&settings).unwrap();
//! ```

pub mod environment;
pub mod loader;
pub mod schema;
pub mod validator;

pub use environment::EnvironmentSettings;
pub use loader::SettingsLoader;
pub use schema::{BandSettings, OccupancySettings, Settings};
pub use validator::SettingsValidator;

use std::path::Path;

use crate::Result;

/// Load settings from file and environment, then validate them.
///
/// # Errors
///
/// Returns an error if loading, an override, or validation fails.
pub fn resolve(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = SettingsLoader::load(explicit)?;
    EnvironmentSettings::apply_overrides(&mut settings)?;
    SettingsValidator::validate(&settings)?;
    Ok(settings)
}
