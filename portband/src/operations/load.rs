//! Configuration loading and the export pipeline.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::{ConfigParser, Configuration, ParseOptions, ParseWarning, TypeClassifier};
use crate::confirm::{ConfirmationPolicy, Decision};
use crate::error::{Error, Result};
use crate::export::ExportMap;
use crate::port::probe::PortProbe;
use crate::settings::Settings;
use crate::validation::{ValidationOptions, ValidationReport, Validator};

/// Where operator overrides come from before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Preseed {
    /// File values are used as written.
    Disabled,
    /// A variable already set in the process environment replaces the file
    /// value of the same key.
    #[default]
    ProcessEnv,
    /// Overrides from an explicit map.
    Map(HashMap<String, String>),
}

impl Preseed {
    fn lookup(&self, key: &str) -> Option<String> {
        match self {
            Self::Disabled => None,
            Self::ProcessEnv => std::env::var(key).ok(),
            Self::Map(map) => map.get(key).cloned(),
        }
    }
}

/// Options for loading a port configuration.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Path of the configuration file.
    pub path: PathBuf,

    /// Parser behavior.
    pub parse: ParseOptions,

    /// Secret key allow-list.
    pub secret_keys: Vec<String>,

    /// Operator override source.
    pub preseed: Preseed,
}

impl LoadOptions {
    /// Options for `path` taken from `settings`, pre-seeding from the
    /// process environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use portband::operations::{LoadOptions, Preseed};
    /// use portband::settings::Settings;
    ///
    /// let options = LoadOptions::new("ports.yaml", &Settings::default())
    ///     .with_preseed(Preseed::Disabled);
    /// assert_eq!(options.preseed, Preseed::Disabled);
    /// ```
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self {
            path: path.into(),
            parse: settings.parse_options(),
            secret_keys: settings.secret_keys.clone(),
            preseed: Preseed::default(),
        }
    }

    /// Sets the override source.
    #[must_use]
    pub fn with_preseed(mut self, preseed: Preseed) -> Self {
        self.preseed = preseed;
        self
    }
}

/// A loaded, classified configuration.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The file the configuration came from.
    pub path: PathBuf,
    /// The classified entries.
    pub configuration: Configuration,
    /// Lines the parser skipped, and repeated keys.
    pub warnings: Vec<ParseWarning>,
    /// Keys whose value came from the environment.
    pub preseeded: Vec<String>,
}

/// Parse, pre-seed and classify the configuration at `options.path`.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] or [`Error::ConfigUnreadable`] if the
/// file cannot be read.
pub fn load_configuration(options: &LoadOptions) -> Result<LoadedConfig> {
    let mut parsed = ConfigParser::new(options.parse).parse_file(&options.path)?;
    let preseeded = parsed.apply_overrides(|key| options.preseed.lookup(key));

    let classifier = TypeClassifier::new(&options.secret_keys);
    parsed.redact_warnings(|key| classifier.is_secret_key(key));
    for warning in &parsed.warnings {
        log::debug!("{}: {warning}", options.path.display());
    }

    let warnings = std::mem::take(&mut parsed.warnings);
    let configuration = Configuration::from_parsed(parsed, &classifier);
    log::info!(
        "loaded {} entries from {}",
        configuration.len(),
        options.path.display()
    );

    Ok(LoadedConfig {
        path: options.path.clone(),
        configuration,
        warnings,
        preseeded,
    })
}

/// Result of a successful export run.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// The loaded configuration.
    pub loaded: LoadedConfig,
    /// Validation findings. Advisory, except for the confirmation gate.
    pub report: ValidationReport,
    /// Variables to publish.
    pub exports: ExportMap,
}

/// Load, validate, pass the confirmation gate and build the export map.
///
/// Out-of-range ports and duplicates are logged as warnings and do not stop
/// the export. Ports found in use go to `policy`; if it declines, nothing is
/// exported.
///
/// # Errors
///
/// Returns an error if loading fails, the policy fails, or the policy
/// declines ([`Error::ConfirmationDeclined`]).
pub fn load_and_export(
    options: &LoadOptions,
    validation: ValidationOptions,
    probe: &dyn PortProbe,
    policy: &mut dyn ConfirmationPolicy,
) -> Result<ExportOutcome> {
    let loaded = load_configuration(options)?;
    let report = Validator::new(validation, probe).validate(&loaded.configuration);

    for finding in &report.out_of_range {
        log::warn!("{finding} is outside the port band {}", report.band);
    }
    for group in &report.duplicates {
        log::warn!("duplicate port: {group}");
    }
    for finding in &report.unknown {
        log::warn!("could not check {}={}: {}", finding.key, finding.value, finding.reason);
    }

    if !report.in_use.is_empty() {
        for finding in &report.in_use {
            log::warn!("{finding} is already in use");
        }
        if policy.confirm(&report.in_use)? == Decision::Abort {
            return Err(Error::ConfirmationDeclined {
                ports: report.in_use_ports(),
            });
        }
        log::info!("continuing with {} port(s) in use", report.in_use.len());
    }

    let exports = ExportMap::from_configuration(&loaded.configuration);
    Ok(ExportOutcome {
        loaded,
        report,
        exports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::{AlwaysAbort, AlwaysContinue};
    use crate::port::probe::StaticProbe;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ports.yaml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn options(path: &Path) -> LoadOptions {
        LoadOptions::new(path, &Settings::default()).with_preseed(Preseed::Disabled)
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_configuration(&options(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn test_load_collects_warnings() {
        let (_dir, path) = write_config("arangodb: 15001\nnot an entry\n");
        let loaded = load_configuration(&options(&path)).unwrap();
        assert_eq!(loaded.configuration.len(), 1);
        assert_eq!(loaded.warnings.len(), 1);
        assert_eq!(loaded.warnings[0].line, 2);
    }

    #[test]
    fn test_load_redacts_secret_warnings() {
        let (_dir, path) =
            write_config("nvidia_api_key: \"old\"\nnvidia_api_key: \"sk-live-123\"\n");
        let loaded = load_configuration(&options(&path)).unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert_eq!(loaded.warnings[0].text, "nvidia_api_key: <set>");
        assert_eq!(
            loaded.configuration.get("nvidia_api_key").unwrap().raw_value(),
            "sk-live-123"
        );
    }

    #[test]
    fn test_preseed_from_map() {
        let (_dir, path) = write_config("arangodb: 15001\napp_host: localhost\n");
        let overrides = HashMap::from([("arangodb".to_string(), "16001".to_string())]);
        let loaded =
            load_configuration(&options(&path).with_preseed(Preseed::Map(overrides))).unwrap();
        assert_eq!(loaded.preseeded, vec!["arangodb"]);
        assert_eq!(loaded.configuration.get("arangodb").unwrap().raw_value(), "16001");
    }

    #[test]
    fn test_preseed_reclassifies() {
        let (_dir, path) = write_config("arangodb: 15001\n");
        let overrides = HashMap::from([("arangodb".to_string(), "db.local".to_string())]);
        let loaded =
            load_configuration(&options(&path).with_preseed(Preseed::Map(overrides))).unwrap();
        assert!(loaded.configuration.get("arangodb").unwrap().port_number().is_none());
    }

    #[test]
    fn test_export_ignores_advisory_findings() {
        let (_dir, path) = write_config("a: 9999\nb: 15001\nc: 15001\n");
        let outcome = load_and_export(
            &options(&path),
            ValidationOptions::default(),
            &StaticProbe::empty(),
            &mut AlwaysAbort,
        )
        .unwrap();
        assert_eq!(outcome.exports.len(), 3);
        assert_eq!(outcome.report.out_of_range.len(), 1);
        assert_eq!(outcome.report.duplicates.len(), 1);
    }

    #[test]
    fn test_declined_gate_exports_nothing() {
        let (_dir, path) = write_config("a: 15001\nb: 15002\n");
        let probe = StaticProbe::empty().with_in_use(15002);
        let err = load_and_export(
            &options(&path),
            ValidationOptions::default(),
            &probe,
            &mut AlwaysAbort,
        )
        .unwrap_err();
        assert!(err.is_declined());
        assert!(err.to_string().contains("15002"));
    }

    #[test]
    fn test_accepted_gate_exports_everything() {
        let (_dir, path) = write_config("a: 15001\nb: 15002\n");
        let probe = StaticProbe::empty().with_in_use(15002);
        let outcome = load_and_export(
            &options(&path),
            ValidationOptions::default(),
            &probe,
            &mut AlwaysContinue,
        )
        .unwrap();
        assert_eq!(outcome.exports.get("b"), Some("15002"));
        assert_eq!(outcome.report.in_use_ports(), vec![15002]);
    }

    #[test]
    fn test_unknown_probe_does_not_trigger_gate() {
        let (_dir, path) = write_config("a: 15001\n");
        let probe = StaticProbe::empty().with_unknown(15001, "permission denied");
        let outcome = load_and_export(
            &options(&path),
            ValidationOptions::default(),
            &probe,
            &mut AlwaysAbort,
        )
        .unwrap();
        assert_eq!(outcome.report.unknown.len(), 1);
    }
}
