//! Common test utilities for integration tests.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use portband::operations::{LoadOptions, Preseed};
use portband::settings::Settings;
use tempfile::TempDir;

/// The configuration shipped with the demo scripts, trimmed.
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

/// A configuration file in a temporary directory.
///
/// The directory is removed when the fixture is dropped.
#[allow(dead_code)]
pub struct ConfigFixture {
    _dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl ConfigFixture {
    /// Write `contents` to `ports.yaml` in a fresh directory.
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "ports.yaml", contents);
        Self { _dir: dir, path }
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load options with default settings and no environment pre-seeding.
    pub fn options(&self) -> LoadOptions {
        self.options_with(&Settings::default())
    }

    /// Load options for `settings` with no environment pre-seeding.
    pub fn options_with(&self, settings: &Settings) -> LoadOptions {
        LoadOptions::new(&self.path, settings).with_preseed(Preseed::Disabled)
    }
}

/// Write a file and return its path.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// RAII guard for setting and restoring environment variables.
///
/// Tests using it must be `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Set `key` to `value` until the guard is dropped.
    pub fn set(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Remove `key` until the guard is dropped.
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}

/// Bind a listener on a loopback port inside the default band and keep it
/// until dropped.
#[allow(dead_code)]
pub fn hold_band_port() -> (std::net::TcpListener, u16) {
    (17000..20000)
        .find_map(|port| {
            std::net::TcpListener::bind(("127.0.0.1", port))
                .ok()
                .map(|listener| (listener, port))
        })
        .expect("no free port in 17000-19999")
}
