//! Human and JSON rendering of loaded configurations and findings.
//!
//! Everything here goes through [`ConfigEntry::display_value`], so secret
//! values never appear.

use serde::Serialize;

use crate::config::{ConfigEntry, Configuration, EntryView, ParseWarning};
use crate::operations::{ComplianceSummary, Suggestion, ValidationOutcome};
use crate::port::probe::ProbeStatus;
use crate::validation::ValidationReport;
use crate::Result;

/// Render the loaded entries as an aligned table.
///
/// # Examples
///
/// ```
/// use portband::config::{ConfigParser, Configuration, TypeClassifier};
/// use portband::output::render_summary_table;
///
/// let parsed = ConfigParser::default().parse_str("arangodb: 15001\nhf_token: \"abc\"\n");
/// let config = Configuration::from_parsed(parsed, &TypeClassifier::default());
///
/// let table = render_summary_table(&config);
/// assert!(table.contains("<set>"));
/// assert!(!table.contains("abc"));
/// ```
#[must_use]
pub fn render_summary_table(config: &Configuration) -> String {
    if config.is_empty() {
        return "No entries loaded.".to_string();
    }

    let key_width = column_width("KEY", config.iter().map(ConfigEntry::key));
    let value_width = column_width("VALUE", config.iter().map(ConfigEntry::display_value));

    let mut lines = vec![format!("{:<key_width$}  {:<value_width$}  KIND", "KEY", "VALUE")];
    for entry in config {
        lines.push(format!(
            "{:<key_width$}  {:<value_width$}  {}",
            entry.key(),
            entry.display_value(),
            entry.kind()
        ));
    }
    lines.join("\n")
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(str::len).chain([header.len()]).max().unwrap_or(0)
}

/// Render per-key pass/fail lines, one finding per line, followed by a
/// summary count.
#[must_use]
pub fn render_validation(outcome: &ValidationOutcome, fail_on_unknown: bool, strict: bool) -> String {
    let report = &outcome.report;
    let mut lines = vec![format!(
        "Port band {} (conflict checks: {})",
        report.band, report.conflict_scope
    )];

    for finding in &report.ports {
        let status = report.status_for(&finding.key);
        if status.passed(fail_on_unknown) && !matches!(status.live, Some(ProbeStatus::Unknown(_)))
        {
            lines.push(format!("PASS  {finding}"));
            continue;
        }
        if status.out_of_range {
            lines.push(format!("FAIL  {finding}: outside port band {}", report.band));
        }
        if status.duplicate {
            if let Some(group) = report
                .duplicates
                .iter()
                .find(|group| group.keys.contains(&finding.key))
            {
                lines.push(format!("FAIL  {finding}: duplicate, {group}"));
            }
        }
        match &status.live {
            Some(ProbeStatus::InUse) => {
                lines.push(format!("FAIL  {finding}: in use by another process"));
            }
            Some(ProbeStatus::Unknown(reason)) => {
                let label = if fail_on_unknown { "FAIL" } else { "WARN" };
                lines.push(format!("{label}  {finding}: could not check: {reason}"));
            }
            Some(ProbeStatus::Free) | None => {}
        }
    }

    if strict {
        for warning in &outcome.loaded.warnings {
            lines.push(format!("FAIL  {warning}"));
        }
    }

    for suggestion in &outcome.suggestions {
        lines.push(render_suggestion(suggestion));
    }

    lines.push(live_check_note(report));
    lines.push(summary_line(outcome, fail_on_unknown, strict));
    lines.join("\n")
}

fn render_suggestion(suggestion: &Suggestion) -> String {
    format!(
        "HINT  {}: {} was free at check time",
        suggestion.key, suggestion.suggested
    )
}

fn live_check_note(report: &ValidationReport) -> String {
    if report.live_check_skipped {
        "Live port check skipped.".to_string()
    } else {
        format!(
            "Live port check at {}; ports may have changed since.",
            report.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

fn summary_line(outcome: &ValidationOutcome, fail_on_unknown: bool, strict: bool) -> String {
    let report = &outcome.report;
    let mut summary = format!(
        "{} finding(s): {} out of range, {} duplicate group(s), {} in use, {} unknown",
        outcome.failure_count(fail_on_unknown, strict),
        report.out_of_range.len(),
        report.duplicates.len(),
        report.in_use.len(),
        report.unknown.len(),
    );
    if strict {
        summary.push_str(&format!(", {} skipped line(s)", outcome.loaded.warnings.len()));
    }
    summary
}

/// Render skipped-line warnings, one per line.
#[must_use]
pub fn render_warnings(warnings: &[ParseWarning]) -> String {
    warnings
        .iter()
        .map(|warning| format!("warning: {warning}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render compliance counts.
#[must_use]
pub fn render_compliance(summary: &ComplianceSummary) -> String {
    let live = if summary.live_check_skipped {
        "skipped".to_string()
    } else {
        format!(
            "{} (may be stale)",
            summary.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    };
    let verdict = if summary.compliant() {
        "compliant"
    } else {
        "not compliant"
    };

    [
        format!("Port configuration: {}", summary.path.display()),
        format!("  band:             {}", summary.band),
        format!("  conflict scope:   {}", summary.conflict_scope),
        format!("  entries:          {}", summary.entries),
        format!("  ports:            {}", summary.ports),
        format!("  secrets:          {}", summary.secrets),
        format!("  in range:         {}", summary.in_range),
        format!("  out of range:     {}", summary.out_of_range),
        format!("  duplicate groups: {}", summary.duplicate_groups),
        format!("  in use:           {}", summary.in_use),
        format!("  unknown:          {}", summary.unknown),
        format!("  skipped lines:    {}", summary.skipped_lines),
        format!("  live check:       {live}"),
        format!("Result: {verdict}"),
    ]
    .join("\n")
}

#[derive(Serialize)]
struct ValidationDocument<'a> {
    passed: bool,
    entries: Vec<EntryView<'a>>,
    report: &'a ValidationReport,
    warnings: &'a [ParseWarning],
    suggestions: &'a [Suggestion],
}

/// Render a validation outcome as pretty JSON, with secrets redacted.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn validation_json(
    outcome: &ValidationOutcome,
    fail_on_unknown: bool,
    strict: bool,
) -> Result<String> {
    let document = ValidationDocument {
        passed: outcome.passed(fail_on_unknown, strict),
        entries: outcome.loaded.configuration.iter().map(EntryView::from).collect(),
        report: &outcome.report,
        warnings: &outcome.loaded.warnings,
        suggestions: &outcome.suggestions,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Render compliance counts as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn compliance_json(summary: &ComplianceSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}
