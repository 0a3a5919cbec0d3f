//! Error types for the portband library.
//!
//! Report findings (out-of-range ports, duplicates, live conflicts) are not
//! errors; they live in [`ValidationReport`](crate::ValidationReport). This
//! module covers the conditions that stop a run.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a portband error.
///
/// # Examples
///
/// ```
/// use portband::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(15001)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the portband library.
#[derive(Debug, Error)]
pub enum Error {
    /// The port configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The port configuration file exists but could not be read.
    #[error("cannot read configuration file {}: {source}", path.display())]
    ConfigUnreadable {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An explicitly requested settings file does not exist.
    #[error("settings file not found: {}", path.display())]
    SettingsNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A settings file could not be parsed.
    #[error("settings error: {0}")]
    Settings(#[from] serde_yaml::Error),

    /// JSON rendering failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred in settings or an override.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An invalid port number was provided.
    #[error("invalid port {value}: {reason}")]
    InvalidPort {
        /// The invalid port value.
        value: u16,
        /// The reason the port is invalid.
        reason: String,
    },

    /// An invalid port band was specified.
    #[error("invalid port band {min}-{max}: {reason}")]
    InvalidBand {
        /// The lower bound of the band.
        min: u16,
        /// The upper bound of the band.
        max: u16,
        /// The reason the band is invalid.
        reason: String,
    },

    /// Continuing past a live port conflict was declined.
    #[error("declined to continue with port(s) in use: {}", join_ports(.ports))]
    ConfirmationDeclined {
        /// The ports found in use.
        ports: Vec<u64>,
    },
}

fn join_ports(ports: &[u64]) -> String {
    ports
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<crate::port::InvalidPortError> for Error {
    fn from(err: crate::port::InvalidPortError) -> Self {
        Self::InvalidPort {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl From<crate::port::InvalidBandError> for Error {
    fn from(err: crate::port::InvalidBandError) -> Self {
        Self::InvalidBand {
            min: err.min.value(),
            max: err.max.value(),
            reason: err.reason,
        }
    }
}

impl Error {
    /// Check if error indicates the port configuration file is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use portband::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::ConfigNotFound { path: PathBuf::from("ports.yaml") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }

    /// Check if the run stopped at the confirmation gate.
    #[must_use]
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::ConfirmationDeclined { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_names_path() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/opt/demo/ports.yaml"),
        };
        let display = format!("{err}");
        assert!(display.contains("not found"));
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("/opt/demo/ports.yaml"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_config_unreadable_names_path() {
        let err = Error::ConfigUnreadable {
            path: PathBuf::from("ports.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = format!("{err}");
        assert!(display.contains("ports.yaml"));
        assert!(display.contains("denied"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "band.min".to_string(),
            message: "must be greater than 0".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("band.min"));
    }

    #[test]
    fn test_invalid_band_error() {
        let err = Error::InvalidBand {
            min: 20000,
            max: 10000,
            reason: "max must be >= min".to_string(),
        };
        assert!(format!("{err}").contains("20000-10000"));
    }

    #[test]
    fn test_confirmation_declined_lists_ports() {
        let err = Error::ConfirmationDeclined {
            ports: vec![15001, 15002],
        };
        assert_eq!(
            format!("{err}"),
            "declined to continue with port(s) in use: 15001, 15002"
        );
        assert!(err.is_declined());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
