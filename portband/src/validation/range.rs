//! Port band checks.

use serde::Serialize;

use crate::config::Configuration;
use crate::PortBand;

/// A port entry named in a finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PortFinding {
    /// The entry key.
    pub key: String,
    /// The numeric value, saturated at `u64::MAX`.
    pub value: u64,
    #[serde(skip)]
    literal: String,
}

impl PortFinding {
    /// Create a finding.
    pub fn new(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            value,
            literal: value.to_string(),
        }
    }

    /// Create a finding from the digits as written. `value` is the parsed
    /// number; the digits keep literals beyond `u64` distinct.
    pub fn with_literal(key: impl Into<String>, value: u64, literal: &str) -> Self {
        let digits = literal.trim_start_matches('0');
        Self {
            key: key.into(),
            value,
            literal: if digits.is_empty() { "0" } else { digits }.to_string(),
        }
    }

    /// The number as written, without leading zeros.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl std::fmt::Display for PortFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.literal)
    }
}

/// Split of the port entries by band membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeOutcome {
    /// Entries inside the band, in configuration order.
    pub in_range: Vec<PortFinding>,
    /// Entries outside the band, in configuration order.
    pub out_of_range: Vec<PortFinding>,
}

/// Checks `Port` entries against the band. Advisory: nothing is dropped.
///
/// # Examples
///
/// ```
/// use portband::validation::RangeValidator;
/// use portband::PortBand;
///
/// let validator = RangeValidator::new(PortBand::default());
/// assert!(validator.check(10000));
/// assert!(!validator.check(20001));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeValidator {
    band: PortBand,
}

impl RangeValidator {
    /// Create a validator for `band`.
    #[must_use]
    pub const fn new(band: PortBand) -> Self {
        Self { band }
    }

    /// Returns `true` if `value` is inside the band.
    #[must_use]
    pub const fn check(&self, value: u64) -> bool {
        self.band.contains_value(value)
    }

    /// Partition every `Port` entry of `config`.
    #[must_use]
    pub fn validate(&self, config: &Configuration) -> RangeOutcome {
        let mut outcome = RangeOutcome::default();
        for (entry, value) in config.ports() {
            let finding = PortFinding::with_literal(entry.key(), value, entry.raw_value());
            if self.check(value) {
                outcome.in_range.push(finding);
            } else {
                log::debug!("{finding} is outside {}", self.band);
                outcome.out_of_range.push(finding);
            }
        }
        outcome
    }
}
