//! Live port probing.
//!
//! A probe answers "is something on this host bound to the port right now?"
//! with one of three answers. The answer is a time-of-check fact: a port
//! reported free may be taken a moment later and a busy port may be released
//! right after the probe. Nothing here reserves a port, and callers must not
//! treat [`ProbeStatus::Free`] as a reservation.
//!
//! The probe is a trait so the validation pipeline can run against a
//! deterministic [`StaticProbe`] in tests.

use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::net::{Ipv4Addr, TcpListener};

use serde::Serialize;

use crate::{Port, PortBand};

/// Outcome of probing a single port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "kebab-case")]
pub enum ProbeStatus {
    /// Nothing was bound to the port at check time.
    Free,
    /// Another process holds the port.
    InUse,
    /// The probe could not decide; the reason says why.
    Unknown(String),
}

/// Parameters for a probe run, derived from settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Skip live probing entirely.
    pub skip: bool,
    /// Bind on all interfaces instead of loopback.
    pub check_all_interfaces: bool,
}

/// Determines whether a port is currently bound on the host.
#[cfg_attr(test, mockall::automock)]
pub trait PortProbe: Send + Sync {
    /// Probe one port. `value` is the configured number, which may not be a
    /// bindable port at all; such values come back as `Unknown`.
    fn probe(&self, value: u64, config: &ProbeConfig) -> ProbeStatus;
}

/// Probe backed by an actual bind attempt on the host.
///
/// A TCP listener is bound to the port on loopback (or `0.0.0.0` when
/// `check_all_interfaces` is set) and dropped immediately. Address-in-use
/// means another process holds it; any other failure, including permission
/// denied, is reported as unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl PortProbe for SystemProbe {
    fn probe(&self, value: u64, config: &ProbeConfig) -> ProbeStatus {
        let port = match u16::try_from(value).ok().filter(|p| *p != 0) {
            Some(port) => port,
            None => return ProbeStatus::Unknown(format!("{value} is not a bindable port")),
        };

        let host = if config.check_all_interfaces {
            Ipv4Addr::UNSPECIFIED
        } else {
            Ipv4Addr::LOCALHOST
        };

        match TcpListener::bind((host, port)) {
            Ok(listener) => {
                drop(listener);
                ProbeStatus::Free
            }
            Err(err) if err.kind() == ErrorKind::AddrInUse => ProbeStatus::InUse,
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                ProbeStatus::Unknown(format!("permission denied binding {host}:{port}"))
            }
            Err(err) => ProbeStatus::Unknown(format!("bind {host}:{port} failed: {err}")),
        }
    }
}

/// Probe with a fixed answer per port, for tests and dry runs.
///
/// # Examples
///
/// ```
/// use portband::port::probe::{PortProbe, ProbeConfig, ProbeStatus, StaticProbe};
///
/// let probe = StaticProbe::empty().with_in_use(15001);
/// let config = ProbeConfig::default();
///
/// assert_eq!(probe.probe(15001, &config), ProbeStatus::InUse);
/// assert_eq!(probe.probe(15002, &config), ProbeStatus::Free);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    in_use: HashSet<u64>,
    unknown: HashMap<u64, String>,
}

impl StaticProbe {
    /// Create a probe that reports every port free.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mark a port as held by another process.
    #[must_use]
    pub fn with_in_use(mut self, value: u64) -> Self {
        self.in_use.insert(value);
        self
    }

    /// Mark a port as indeterminate.
    #[must_use]
    pub fn with_unknown(mut self, value: u64, reason: impl Into<String>) -> Self {
        self.unknown.insert(value, reason.into());
        self
    }
}

impl PortProbe for StaticProbe {
    fn probe(&self, value: u64, _config: &ProbeConfig) -> ProbeStatus {
        if let Some(reason) = self.unknown.get(&value) {
            ProbeStatus::Unknown(reason.clone())
        } else if self.in_use.contains(&value) {
            ProbeStatus::InUse
        } else {
            ProbeStatus::Free
        }
    }
}

/// Find the first port above `from` inside `band` that is free on the host
/// and not in `taken`.
///
/// Used to suggest a replacement when a configured port collides. The same
/// time-of-check caveat applies: the suggestion is not reserved.
#[must_use]
pub fn suggest_free_port(from: u64, band: &PortBand, taken: &HashSet<u64>) -> Option<Port> {
    band.iter()
        .filter(|port| u64::from(port.value()) > from)
        .chain(band.iter().filter(|port| u64::from(port.value()) <= from))
        .find(|port| {
            !taken.contains(&u64::from(port.value())) && port_selector::is_free(port.value())
        })
}
