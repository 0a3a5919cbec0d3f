//! Compliance summary for report mode.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::load::{load_configuration, LoadOptions};
use crate::config::EntryKind;
use crate::error::Result;
use crate::port::probe::PortProbe;
use crate::validation::{ConflictScope, ValidationOptions, Validator};
use crate::PortBand;

/// Counts describing how a configuration complies with the band.
///
/// Report mode never exports anything and never fails on findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    /// The configuration file.
    pub path: PathBuf,
    /// The band checked against.
    pub band: PortBand,
    /// Conflict candidate selection.
    pub conflict_scope: ConflictScope,
    /// All entries.
    pub entries: usize,
    /// Entries classified as ports.
    pub ports: usize,
    /// Entries classified as secrets.
    pub secrets: usize,
    /// Ports inside the band.
    pub in_range: usize,
    /// Ports outside the band.
    pub out_of_range: usize,
    /// Values held by more than one key.
    pub duplicate_groups: usize,
    /// Ports bound by another process.
    pub in_use: usize,
    /// Ports whose probe was indeterminate.
    pub unknown: usize,
    /// Lines the parser skipped.
    pub skipped_lines: usize,
    /// The live pass did not run.
    pub live_check_skipped: bool,
    /// When the live pass ran.
    pub checked_at: DateTime<Utc>,
}

impl ComplianceSummary {
    /// Returns `true` if every port is in the band and unique, and none is
    /// in use.
    #[must_use]
    pub const fn compliant(&self) -> bool {
        self.out_of_range == 0 && self.duplicate_groups == 0 && self.in_use == 0
    }
}

/// Load and validate a configuration and count the findings.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub fn compliance_report(
    options: &LoadOptions,
    validation: ValidationOptions,
    probe: &dyn PortProbe,
) -> Result<ComplianceSummary> {
    let loaded = load_configuration(options)?;
    let report = Validator::new(validation, probe).validate(&loaded.configuration);

    let secrets = loaded
        .configuration
        .iter()
        .filter(|entry| entry.kind() == EntryKind::Secret)
        .count();

    Ok(ComplianceSummary {
        path: loaded.path,
        band: report.band,
        conflict_scope: report.conflict_scope,
        entries: loaded.configuration.len(),
        ports: report.ports.len(),
        secrets,
        in_range: report.in_range_count(),
        out_of_range: report.out_of_range.len(),
        duplicate_groups: report.duplicates.len(),
        in_use: report.in_use.len(),
        unknown: report.unknown.len(),
        skipped_lines: loaded.warnings.len(),
        live_check_skipped: report.live_check_skipped,
        checked_at: report.checked_at,
    })
}
