//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers that isolate settings from the host
//! - Test data fixtures

use assert_cmd::Command;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads, cleared for every test command.
const PORTBAND_VARS: &[&str] = &[
    "PORTBAND_CONFIG",
    "PORTBAND_LOG_MODE",
    "PORTBAND_BAND_MIN",
    "PORTBAND_BAND_MAX",
    "PORTBAND_SECRET_KEYS",
    "PORTBAND_CONFLICT_SCOPE",
    "PORTBAND_SKIP_OCCUPANCY_CHECK",
    "PORTBAND_CHECK_ALL_INTERFACES",
    "PORTBAND_ON_CONFLICT",
];

/// A clean configuration: three band ports plus a host and two secrets.
#[allow(dead_code)]
pub const DEMO_CONFIG: &str = "\
# Port configuration for the demos
arangodb: 15001
qdrant_http: 15002
qdrant_grpc: 15003

# ollama: 11434
app_host: localhost
nvidia_api_key: \"abc123\"
hf_token: \"\"
";

/// Test environment with an isolated settings file.
///
/// This struct provides:
/// - A temporary directory used as the working directory
/// - An empty settings file so the host's `~/.portband` is never read
/// - Helper methods for writing configurations
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the settings file handed to every command
    pub settings_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let settings_path = temp_path.join("settings.yaml");
        std::fs::write(&settings_path, "").expect("Failed to write settings");

        Self {
            temp_dir,
            temp_path,
            settings_path,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        Command::cargo_bin("portband").expect("Failed to find portband binary")
    }

    /// Get a command builder running in the temp directory with the
    /// isolated settings file and no `PORTBAND_*` variables.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        for var in PORTBAND_VARS {
            cmd.env_remove(var);
        }
        cmd.env("PORTBAND_SETTINGS", &self.settings_path)
            .current_dir(&self.temp_path);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temp directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write `contents` to `ports.yaml`, the default configuration file.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        self.write("ports.yaml", contents)
    }

    /// Replace the settings file contents.
    pub fn write_settings(&self, contents: &str) {
        std::fs::write(&self.settings_path, contents).expect("Failed to write settings");
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Bind a loopback port inside the default band and keep it until the
/// listener is dropped.
#[allow(dead_code)]
pub fn hold_band_port() -> (TcpListener, u16) {
    (17000..20000)
        .find_map(|port| {
            TcpListener::bind(("127.0.0.1", port))
                .ok()
                .map(|listener| (listener, port))
        })
        .expect("no free port in 17000-19999")
}
