//! Port and port band types.
//!
//! A [`PortBand`] is the accepted range for service ports in a deployment.
//! Configuration values are compared against it as plain `u64`s because a
//! config file may hold numbers that are not valid ports at all.

pub mod probe;

#[cfg(test)]
mod proptests;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A valid network port number (1-65535).
///
/// # Examples
///
/// ```
/// use portband::Port;
///
/// let port = Port::try_from(15001).unwrap();
/// assert_eq!(port.value(), 15001);
/// assert!(Port::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// The minimum valid port number.
    pub const MIN: u16 = 1;

    /// The maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Returns the underlying port number.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Port {
    type Error = InvalidPortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(InvalidPortError {
                value,
                reason: "port 0 is invalid".into(),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid port numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPortError {
    /// The invalid port value.
    pub value: u16,
    /// The reason the port is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidPortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid port {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidPortError {}

/// The accepted port band (inclusive on both ends).
///
/// # Examples
///
/// ```
/// use portband::PortBand;
///
/// let band = PortBand::default();
/// assert!(!band.contains_value(9999));
/// assert!(band.contains_value(10000));
/// assert!(band.contains_value(20000));
/// assert!(!band.contains_value(20001));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PortBand {
    min: Port,
    max: Port,
}

impl PortBand {
    /// Lower bound of the default band.
    pub const DEFAULT_MIN: u16 = 10000;

    /// Upper bound of the default band.
    pub const DEFAULT_MAX: u16 = 20000;

    /// Creates a new band.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is less than `min`.
    pub fn new(min: Port, max: Port) -> Result<Self, InvalidBandError> {
        if max < min {
            Err(InvalidBandError {
                min,
                max,
                reason: "max must be greater than or equal to min".into(),
            })
        } else {
            Ok(Self { min, max })
        }
    }

    /// Creates a band from raw bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is 0 or `max` is less than `min`.
    pub fn from_bounds(min: u16, max: u16) -> crate::Result<Self> {
        Ok(Self::new(Port::try_from(min)?, Port::try_from(max)?)?)
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> Port {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> Port {
        self.max
    }

    /// Returns `true` if `value` lies within the band.
    #[must_use]
    pub const fn contains_value(&self, value: u64) -> bool {
        value >= self.min.value() as u64 && value <= self.max.value() as u64
    }

    /// Returns `true` if the band contains the given port.
    #[must_use]
    pub const fn contains(&self, port: Port) -> bool {
        self.contains_value(port.value() as u64)
    }

    /// Returns the number of ports in the band.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.max.value() as u32 - self.min.value() as u32 + 1
    }

    /// Always `false`; a constructed band holds at least one port.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the ports of the band, ascending.
    pub fn iter(self) -> impl Iterator<Item = Port> {
        (self.min.value()..=self.max.value()).map(Port)
    }
}

impl Default for PortBand {
    fn default() -> Self {
        Self {
            min: Port(Self::DEFAULT_MIN),
            max: Port(Self::DEFAULT_MAX),
        }
    }
}

impl fmt::Display for PortBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Error type for invalid port bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidBandError {
    /// The lower bound.
    pub min: Port,
    /// The upper bound.
    pub max: Port,
    /// The reason the band is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidBandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid port band {}-{}: {}",
            self.min, self.max, self.reason
        )
    }
}

impl std::error::Error for InvalidBandError {}
