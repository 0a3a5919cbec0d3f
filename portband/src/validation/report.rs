//! Validation report.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::duplicates::DuplicateGroup;
use super::range::PortFinding;
use super::ConflictScope;
use crate::port::probe::ProbeStatus;
use crate::PortBand;

/// A port whose live probe could not decide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownFinding {
    /// The entry key.
    pub key: String,
    /// The numeric value.
    pub value: u64,
    /// Why the probe was indeterminate.
    pub reason: String,
}

/// Findings of one validation pass. Read-only once built.
///
/// `in_use` and `unknown` describe the host at `checked_at` and may be stale
/// by the time anyone reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Band the ports were checked against.
    pub band: PortBand,
    /// Which ports took part in the duplicate and live passes.
    pub conflict_scope: ConflictScope,
    /// Every `Port` entry, in configuration order.
    pub ports: Vec<PortFinding>,
    /// Entries outside the band.
    pub out_of_range: Vec<PortFinding>,
    /// Values held by more than one key.
    pub duplicates: Vec<DuplicateGroup>,
    /// Entries whose port is bound by another process.
    pub in_use: Vec<PortFinding>,
    /// Entries whose probe was indeterminate.
    pub unknown: Vec<UnknownFinding>,
    /// The live pass did not run.
    pub live_check_skipped: bool,
    /// When the live pass ran.
    pub checked_at: DateTime<Utc>,
}

/// Everything the report says about one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStatus {
    /// Outside the band.
    pub out_of_range: bool,
    /// Shares its value with other keys.
    pub duplicate: bool,
    /// Live probe result, if the key was probed.
    pub live: Option<ProbeStatus>,
}

impl KeyStatus {
    /// Returns `true` if nothing is wrong with the key. Unknown probes count
    /// as failures only when `fail_on_unknown` is set.
    #[must_use]
    pub fn passed(&self, fail_on_unknown: bool) -> bool {
        let live_ok = match &self.live {
            Some(ProbeStatus::InUse) => false,
            Some(ProbeStatus::Unknown(_)) => !fail_on_unknown,
            Some(ProbeStatus::Free) | None => true,
        };
        !self.out_of_range && !self.duplicate && live_ok
    }
}

impl ValidationReport {
    /// Status of one key.
    #[must_use]
    pub fn status_for(&self, key: &str) -> KeyStatus {
        let out_of_range = self.out_of_range.iter().any(|f| f.key == key);
        let duplicate = self
            .duplicates
            .iter()
            .any(|group| group.keys.iter().any(|k| k == key));

        let live = if self.in_use.iter().any(|f| f.key == key) {
            Some(ProbeStatus::InUse)
        } else if let Some(unknown) = self.unknown.iter().find(|f| f.key == key) {
            Some(ProbeStatus::Unknown(unknown.reason.clone()))
        } else if self.live_check_skipped
            || (out_of_range && self.conflict_scope == ConflictScope::InRange)
        {
            None
        } else if self.ports.iter().any(|f| f.key == key) {
            Some(ProbeStatus::Free)
        } else {
            None
        };

        KeyStatus {
            out_of_range,
            duplicate,
            live,
        }
    }

    /// Number of findings that fail validation.
    #[must_use]
    pub fn failure_count(&self, fail_on_unknown: bool) -> usize {
        let unknown = if fail_on_unknown { self.unknown.len() } else { 0 };
        self.out_of_range.len() + self.duplicates.len() + self.in_use.len() + unknown
    }

    /// Returns `true` if the range, duplicate and live checks found nothing.
    #[must_use]
    pub fn passed(&self, fail_on_unknown: bool) -> bool {
        self.failure_count(fail_on_unknown) == 0
    }

    /// Distinct port values found in use, ascending.
    #[must_use]
    pub fn in_use_ports(&self) -> Vec<u64> {
        let mut ports: Vec<u64> = self.in_use.iter().map(|f| f.value).collect();
        ports.sort_unstable();
        ports.dedup();
        ports
    }

    /// Number of port entries inside the band.
    #[must_use]
    pub fn in_range_count(&self) -> usize {
        self.ports.len() - self.out_of_range.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_report() -> ValidationReport {
        ValidationReport {
            band: PortBand::default(),
            conflict_scope: ConflictScope::InRange,
            ports: vec![PortFinding::new("a", 15001), PortFinding::new("b", 9999)],
            out_of_range: vec![PortFinding::new("b", 9999)],
            duplicates: Vec::new(),
            in_use: Vec::new(),
            unknown: Vec::new(),
            live_check_skipped: false,
            checked_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_for_in_range_free_port() {
        let report = empty_report();
        let status = report.status_for("a");
        assert_eq!(status.live, Some(ProbeStatus::Free));
        assert!(status.passed(true));
    }

    #[test]
    fn test_out_of_range_not_probed_under_in_range_scope() {
        let report = empty_report();
        let status = report.status_for("b");
        assert!(status.out_of_range);
        assert_eq!(status.live, None);
        assert!(!status.passed(false));
    }

    #[test]
    fn test_unknown_fails_only_when_asked() {
        let mut report = empty_report();
        report.out_of_range.clear();
        report.unknown.push(UnknownFinding {
            key: "a".into(),
            value: 15001,
            reason: "permission denied".into(),
        });
        assert!(report.passed(false));
        assert!(!report.passed(true));
        assert!(report.status_for("a").passed(false));
        assert!(!report.status_for("a").passed(true));
    }

    #[test]
    fn test_failure_count() {
        let mut report = empty_report();
        report.in_use.push(PortFinding::new("a", 15001));
        assert_eq!(report.failure_count(false), 2);
        assert_eq!(report.in_use_ports(), vec![15001]);
        assert_eq!(report.in_range_count(), 1);
    }

    #[test]
    fn test_skipped_live_check_has_no_live_status() {
        let mut report = empty_report();
        report.live_check_skipped = true;
        assert_eq!(report.status_for("a").live, None);
    }
}
