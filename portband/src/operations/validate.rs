//! Validate-only mode.

use std::collections::HashSet;

use serde::Serialize;

use super::load::{load_configuration, LoadOptions, LoadedConfig};
use crate::error::Result;
use crate::port::probe::{suggest_free_port, PortProbe};
use crate::validation::{ValidationOptions, ValidationReport, Validator};

/// A free port proposed for a key that collides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// The colliding key.
    pub key: String,
    /// Its current value.
    pub current: u64,
    /// A port free at check time, not in the configuration.
    pub suggested: u16,
}

/// Result of a validate-only run.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// The loaded configuration.
    pub loaded: LoadedConfig,
    /// Validation findings.
    pub report: ValidationReport,
    /// Replacement ports for in-use and duplicate keys.
    pub suggestions: Vec<Suggestion>,
}

impl ValidationOutcome {
    /// Returns `true` if there are no out-of-range, duplicate or in-use
    /// findings. `fail_on_unknown` makes indeterminate probes fail as well;
    /// `strict` makes skipped lines fail.
    #[must_use]
    pub fn passed(&self, fail_on_unknown: bool, strict: bool) -> bool {
        self.report.passed(fail_on_unknown) && !(strict && !self.loaded.warnings.is_empty())
    }

    /// Number of failing findings under the same rules as [`Self::passed`].
    #[must_use]
    pub fn failure_count(&self, fail_on_unknown: bool, strict: bool) -> usize {
        let skipped = if strict { self.loaded.warnings.len() } else { 0 };
        self.report.failure_count(fail_on_unknown) + skipped
    }
}

/// Load and validate without exporting anything.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub fn validate_only(
    options: &LoadOptions,
    validation: ValidationOptions,
    probe: &dyn PortProbe,
) -> Result<ValidationOutcome> {
    let loaded = load_configuration(options)?;
    let report = Validator::new(validation, probe).validate(&loaded.configuration);
    let suggestions = if report.live_check_skipped {
        Vec::new()
    } else {
        suggest_replacements(&report)
    };

    Ok(ValidationOutcome {
        loaded,
        report,
        suggestions,
    })
}

// Every in-use key and every duplicate key after the first gets a port that
// is neither configured nor already suggested.
fn suggest_replacements(report: &ValidationReport) -> Vec<Suggestion> {
    let mut taken: HashSet<u64> = report.ports.iter().map(|f| f.value).collect();
    let mut colliding: Vec<(String, u64)> = Vec::new();

    for finding in &report.in_use {
        colliding.push((finding.key.clone(), finding.value));
    }
    for group in &report.duplicates {
        for key in group.keys.iter().skip(1) {
            if !colliding.iter().any(|(k, _)| k == key) {
                colliding.push((key.clone(), group.value));
            }
        }
    }

    let mut suggestions = Vec::new();
    for (key, current) in colliding {
        if let Some(port) = suggest_free_port(current, &report.band, &taken) {
            taken.insert(u64::from(port.value()));
            suggestions.push(Suggestion {
                key,
                current,
                suggested: port.value(),
            });
        } else {
            log::debug!("no free port left in {} for {key}", report.band);
        }
    }
    suggestions
}
