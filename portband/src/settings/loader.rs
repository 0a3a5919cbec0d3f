//! Settings file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Name of the per-user settings directory under the home directory.
pub const SETTINGS_DIR: &str = ".portband";

/// Name of the settings file inside [`SETTINGS_DIR`].
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Loads settings from disk.
///
/// # Examples
///
/// ```no_run
/// use portband::settings::SettingsLoader;
///
/// let settings = SettingsLoader::load(None).unwrap();
/// println!("band: {}-{}", settings.band.min, settings.band.max);
/// ```
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `~/.portband/settings.yaml`
    /// is read when present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing, or if a settings file
    /// exists but cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Settings> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::SettingsNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::load_file(path);
        }

        match Self::user_settings_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => Ok(Settings::default()),
        }
    }

    /// Load and parse one settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid settings
    /// YAML.
    pub fn load_file(path: &Path) -> Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let blank = contents.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Settings::default());
        }
        let settings = serde_yaml::from_str(&contents)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Default user settings location, if a home directory is known.
    #[must_use]
    pub fn user_settings_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }
}
