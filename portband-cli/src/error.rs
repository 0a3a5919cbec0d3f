//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use portband::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Settings could not be loaded or are invalid.
    Config(String),

    /// Validation found problems.
    SemanticFailure(String),

    /// The command run by `load` exited unsuccessfully.
    ChildExit(i32),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Fatal error (missing configuration, declined at the
    ///   confirmation gate, I/O) or validation failure
    /// - 2: Invalid arguments or invalid settings
    /// - the child's own code when `load -- COMMAND` fails
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(_) | CliError::Io(_) | CliError::SemanticFailure(_) => 1,
            CliError::InvalidArguments(_) | CliError::Config(_) => 2,
            CliError::ChildExit(code) => *code,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Settings error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
            CliError::ChildExit(code) => write!(f, "command exited with status {code}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
