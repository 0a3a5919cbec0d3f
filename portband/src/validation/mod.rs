//! Port validation: band check, structural duplicates and live conflicts.
//!
//! [`Validator::validate`] runs the three passes in order and returns a
//! [`ValidationReport`]. Validation is advisory; whether a finding stops a
//! run is the caller's decision.

pub mod duplicates;
pub mod range;
pub mod report;

pub use duplicates::{find_duplicates, DuplicateGroup};
pub use range::{PortFinding, RangeOutcome, RangeValidator};
pub use report::{KeyStatus, UnknownFinding, ValidationReport};

use std::collections::BTreeMap;

use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::port::probe::{PortProbe, ProbeConfig, ProbeStatus};
use crate::PortBand;

/// Which port entries take part in the duplicate and live passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictScope {
    /// Only entries inside the band; out-of-range ports are reported once.
    #[default]
    InRange,
    /// Every numeric entry.
    All,
}

impl std::fmt::Display for ConflictScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InRange => write!(f, "in-range ports only"),
            Self::All => write!(f, "all numeric entries"),
        }
    }
}

/// Parameters for a validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// The accepted band.
    pub band: PortBand,
    /// Conflict candidate selection.
    pub scope: ConflictScope,
    /// Live probe parameters.
    pub probe: ProbeConfig,
}

/// Runs the validation passes against a probe.
///
/// # Examples
///
/// ```
/// use portband::config::{ConfigParser, Configuration, TypeClassifier};
/// use portband::port::probe::StaticProbe;
/// use portband::validation::{ValidationOptions, Validator};
///
/// let parsed = ConfigParser::default().parse_str("arangodb: 15001\nqdrant_http: 15001\n");
/// let config = Configuration::from_parsed(parsed, &TypeClassifier::default());
///
/// let probe = StaticProbe::empty();
/// let report = Validator::new(ValidationOptions::default(), &probe).validate(&config);
/// assert_eq!(report.duplicates.len(), 1);
/// assert!(!report.passed(false));
/// ```
pub struct Validator<'p, P: PortProbe + ?Sized> {
    options: ValidationOptions,
    probe: &'p P,
}

impl<'p, P: PortProbe + ?Sized> Validator<'p, P> {
    /// Create a validator.
    pub fn new(options: ValidationOptions, probe: &'p P) -> Self {
        Self { options, probe }
    }

    /// Run the band, duplicate and live passes.
    #[must_use]
    pub fn validate(&self, config: &Configuration) -> ValidationReport {
        let ports: Vec<PortFinding> = config
            .ports()
            .map(|(entry, value)| {
                PortFinding::with_literal(entry.key(), value, entry.raw_value())
            })
            .collect();

        let range = RangeValidator::new(self.options.band).validate(config);

        let candidates = match self.options.scope {
            ConflictScope::InRange => range.in_range.clone(),
            ConflictScope::All => ports.clone(),
        };

        let duplicates = find_duplicates(&candidates);

        let checked_at = Utc::now();
        let (in_use, unknown) = if self.options.probe.skip {
            log::debug!("live port check skipped");
            (Vec::new(), Vec::new())
        } else {
            self.live_pass(&candidates)
        };

        ValidationReport {
            band: self.options.band,
            conflict_scope: self.options.scope,
            ports,
            out_of_range: range.out_of_range,
            duplicates,
            in_use,
            unknown,
            live_check_skipped: self.options.probe.skip,
            checked_at,
        }
    }

    // Each distinct value is probed once and the answer shared by its keys.
    fn live_pass(&self, candidates: &[PortFinding]) -> (Vec<PortFinding>, Vec<UnknownFinding>) {
        let mut answers: BTreeMap<u64, ProbeStatus> = BTreeMap::new();
        let mut in_use = Vec::new();
        let mut unknown = Vec::new();

        for finding in candidates {
            let status = answers
                .entry(finding.value)
                .or_insert_with(|| self.probe.probe(finding.value, &self.options.probe));

            match status {
                ProbeStatus::Free => {}
                ProbeStatus::InUse => {
                    log::debug!("{finding} is bound by another process");
                    in_use.push(finding.clone());
                }
                ProbeStatus::Unknown(reason) => {
                    log::debug!("{finding} probe indeterminate: {reason}");
                    unknown.push(UnknownFinding {
                        key: finding.key.clone(),
                        value: finding.value,
                        reason: reason.clone(),
                    });
                }
            }
        }

        (in_use, unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigParser, TypeClassifier};
    use crate::port::probe::{MockPortProbe, StaticProbe};
    use mockall::predicate::eq;

    fn configuration(contents: &str) -> Configuration {
        Configuration::from_parsed(
            ConfigParser::default().parse_str(contents),
            &TypeClassifier::default(),
        )
    }

    #[test]
    fn test_clean_configuration_passes() {
        let config = configuration("arangodb: 15001\nqdrant_http: 15002\napp_host: localhost\n");
        let report = Validator::new(ValidationOptions::default(), &StaticProbe::empty())
            .validate(&config);
        assert!(report.passed(true));
        assert_eq!(report.ports.len(), 2);
    }

    #[test]
    fn test_duplicate_scenario() {
        let config = configuration("arangodb: 15001\nqdrant_http: 15001\n");
        let report = Validator::new(ValidationOptions::default(), &StaticProbe::empty())
            .validate(&config);
        assert_eq!(
            report.duplicates,
            vec![DuplicateGroup {
                value: 15001,
                keys: vec!["arangodb".into(), "qdrant_http".into()],
            }]
        );
    }

    #[test]
    fn test_out_of_range_excluded_from_conflicts_by_default() {
        let config = configuration("a: 9999\nb: 9999\n");
        let probe = StaticProbe::empty().with_in_use(9999);
        let report = Validator::new(ValidationOptions::default(), &probe).validate(&config);
        assert_eq!(report.out_of_range.len(), 2);
        assert!(report.duplicates.is_empty());
        assert!(report.in_use.is_empty());
    }

    #[test]
    fn test_all_scope_keeps_oversized_numbers_apart() {
        let config = configuration(
            "a: 99999999999999999999\nb: 88888888888888888888\nc: 88888888888888888888\n",
        );
        let options = ValidationOptions {
            scope: ConflictScope::All,
            ..ValidationOptions::default()
        };
        let report = Validator::new(options, &StaticProbe::empty()).validate(&config);
        assert_eq!(report.out_of_range.len(), 3);
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.duplicates[0].keys, vec!["b", "c"]);
        assert_eq!(report.ports[0].to_string(), "a=99999999999999999999");
    }

    #[test]
    fn test_all_scope_checks_out_of_range_ports() {
        let config = configuration("a: 9999\nb: 9999\n");
        let probe = StaticProbe::empty().with_in_use(9999);
        let options = ValidationOptions {
            scope: ConflictScope::All,
            ..ValidationOptions::default()
        };
        let report = Validator::new(options, &probe).validate(&config);
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.in_use.len(), 2);
    }

    #[test]
    fn test_in_use_and_unknown_reported() {
        let config = configuration("a: 15001\nb: 15002\nc: 15003\n");
        let probe = StaticProbe::empty()
            .with_in_use(15001)
            .with_unknown(15003, "permission denied");
        let report = Validator::new(ValidationOptions::default(), &probe).validate(&config);
        assert_eq!(report.in_use, vec![PortFinding::new("a", 15001)]);
        assert_eq!(report.unknown.len(), 1);
        assert_eq!(report.unknown[0].reason, "permission denied");
        assert!(!report.passed(false));
    }

    #[test]
    fn test_each_value_probed_once() {
        let config = configuration("a: 15001\nb: 15001\nc: 15002\n");
        let mut probe = MockPortProbe::new();
        probe
            .expect_probe()
            .with(eq(15001), mockall::predicate::always())
            .times(1)
            .return_const(ProbeStatus::InUse);
        probe
            .expect_probe()
            .with(eq(15002), mockall::predicate::always())
            .times(1)
            .return_const(ProbeStatus::Free);

        let report = Validator::new(ValidationOptions::default(), &probe).validate(&config);
        assert_eq!(report.in_use.len(), 2);
    }

    #[test]
    fn test_skip_never_probes() {
        let config = configuration("a: 15001\n");
        let mut probe = MockPortProbe::new();
        probe.expect_probe().never();

        let options = ValidationOptions {
            probe: ProbeConfig {
                skip: true,
                ..ProbeConfig::default()
            },
            ..ValidationOptions::default()
        };
        let report = Validator::new(options, &probe).validate(&config);
        assert!(report.live_check_skipped);
        assert!(report.passed(true));
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(ConflictScope::InRange.to_string(), "in-range ports only");
    }
}
