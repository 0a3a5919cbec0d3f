//! Settings schema definitions.

use serde::{Deserialize, Serialize};

use crate::config::{DuplicateKeyPolicy, ParseOptions, QuoteMode, DEFAULT_SECRET_KEYS};
use crate::confirm::OnConflict;
use crate::port::probe::ProbeConfig;
use crate::validation::{ConflictScope, ValidationOptions};
use crate::{PortBand, Result};

/// Tool settings.
///
/// These govern how a port configuration is read and judged; they are not
/// part of the port configuration itself. Every field has a default so a
/// settings file only needs to name what it changes.
///
/// # Examples
///
/// ```
/// use portband::settings::Settings;
///
/// let settings: Settings = serde_yaml::from_str("band: { min: 11000, max: 12000 }").unwrap();
/// assert_eq!(settings.band.min, 11000);
/// assert_eq!(settings.secret_keys, Settings::default().secret_keys);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// The accepted port band.
    pub band: BandSettings,

    /// Keys whose values are secrets.
    pub secret_keys: Vec<String>,

    /// Which ports take part in conflict checks.
    pub conflict_scope: ConflictScope,

    /// How a repeated key is resolved.
    pub duplicate_keys: DuplicateKeyPolicy,

    /// How enclosing quotes are stripped.
    pub quotes: QuoteMode,

    /// Live probe settings.
    pub occupancy: OccupancySettings,

    /// What to do when a port is found in use during export.
    pub on_conflict: Option<OnConflict>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            band: BandSettings::default(),
            secret_keys: DEFAULT_SECRET_KEYS.iter().map(|k| (*k).to_string()).collect(),
            conflict_scope: ConflictScope::default(),
            duplicate_keys: DuplicateKeyPolicy::default(),
            quotes: QuoteMode::default(),
            occupancy: OccupancySettings::default(),
            on_conflict: None,
        }
    }
}

impl Settings {
    /// The configured band.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is 0 or `max < min`.
    pub fn port_band(&self) -> Result<PortBand> {
        PortBand::from_bounds(self.band.min, self.band.max)
    }

    /// Parser options derived from these settings.
    #[must_use]
    pub const fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            quotes: self.quotes,
            duplicate_keys: self.duplicate_keys,
        }
    }

    /// Validation options derived from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the band is invalid.
    pub fn validation_options(&self) -> Result<ValidationOptions> {
        Ok(ValidationOptions {
            band: self.port_band()?,
            scope: self.conflict_scope,
            probe: ProbeConfig::from(&self.occupancy),
        })
    }
}

/// Port band bounds.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BandSettings {
    /// Lower bound (inclusive).
    pub min: u16,
    /// Upper bound (inclusive).
    pub max: u16,
}

impl Default for BandSettings {
    fn default() -> Self {
        Self {
            min: PortBand::DEFAULT_MIN,
            max: PortBand::DEFAULT_MAX,
        }
    }
}

/// Live probe settings.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OccupancySettings {
    /// Skip live probing.
    pub skip: bool,
    /// Probe all interfaces rather than loopback.
    pub check_all_interfaces: bool,
}

impl From<&OccupancySettings> for ProbeConfig {
    fn from(settings: &OccupancySettings) -> Self {
        Self {
            skip: settings.skip,
            check_all_interfaces: settings.check_all_interfaces,
        }
    }
}
