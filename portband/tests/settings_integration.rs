//! Integration tests for settings resolution.
//!
//! Tests that modify environment variables are marked with `#[serial]`;
//! the process environment is global.

mod common;

use common::{hold_band_port, write_file, ConfigFixture, EnvGuard};
use portband::operations::{load_configuration, validate_only, LoadOptions, Preseed};
use portband::port::probe::SystemProbe;
use portband::settings::environment::{
    BAND_MAX_ENV, BAND_MIN_ENV, CHECK_ALL_INTERFACES_ENV, CONFLICT_SCOPE_ENV, ON_CONFLICT_ENV,
    SECRET_KEYS_ENV, SKIP_OCCUPANCY_ENV,
};
use portband::settings::{self, Settings};
use portband::validation::ConflictScope;
use portband::{Error, OnConflict};
use serial_test::serial;

fn clear_overrides() -> Vec<EnvGuard> {
    [
        BAND_MIN_ENV,
        BAND_MAX_ENV,
        SECRET_KEYS_ENV,
        CONFLICT_SCOPE_ENV,
        SKIP_OCCUPANCY_ENV,
        CHECK_ALL_INTERFACES_ENV,
        ON_CONFLICT_ENV,
    ]
    .into_iter()
    .map(EnvGuard::remove)
    .collect()
}

#[test]
#[serial]
fn test_resolve_file_then_environment() {
    let _clean = clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "settings.yaml",
        "band: { min: 11000, max: 12000 }\nconflict_scope: all\n",
    );

    let _max = EnvGuard::set(BAND_MAX_ENV, "13000");
    let _policy = EnvGuard::set(ON_CONFLICT_ENV, "Continue");

    let settings = settings::resolve(Some(&path)).unwrap();
    assert_eq!(settings.band.min, 11000);
    assert_eq!(settings.band.max, 13000);
    assert_eq!(settings.conflict_scope, ConflictScope::All);
    assert_eq!(settings.on_conflict, Some(OnConflict::Continue));
}

#[test]
#[serial]
fn test_environment_band_is_validated() {
    let _clean = clear_overrides();
    let _min = EnvGuard::set(BAND_MIN_ENV, "15000");
    let _max = EnvGuard::set(BAND_MAX_ENV, "14000");

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "settings.yaml", "# defaults\n");
    assert!(settings::resolve(Some(&path)).is_err());
}

#[test]
#[serial]
fn test_bad_environment_value_names_variable() {
    let _clean = clear_overrides();
    let _skip = EnvGuard::set(SKIP_OCCUPANCY_ENV, "maybe");

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "settings.yaml", "");
    match settings::resolve(Some(&path)) {
        Err(Error::Validation { field, .. }) => assert_eq!(field, SKIP_OCCUPANCY_ENV),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_secret_keys_from_environment() {
    let _clean = clear_overrides();
    let _keys = EnvGuard::set(SECRET_KEYS_ENV, "openai_api_key, hf_token");

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "settings.yaml", "");
    let settings = settings::resolve(Some(&path)).unwrap();
    assert_eq!(settings.secret_keys, vec!["openai_api_key", "hf_token"]);
}

#[test]
#[serial]
fn test_skip_occupancy_from_environment() {
    let _clean = clear_overrides();
    let _skip = EnvGuard::set(SKIP_OCCUPANCY_ENV, "yes");

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "settings.yaml", "");
    let settings = settings::resolve(Some(&path)).unwrap();

    let (_listener, port) = hold_band_port();
    let fixture = ConfigFixture::new(&format!("arangodb: {port}\n"));
    let outcome = validate_only(
        &fixture.options_with(&settings),
        settings.validation_options().unwrap(),
        &SystemProbe,
    )
    .unwrap();
    assert!(outcome.report.live_check_skipped);
    assert!(outcome.passed(true, false));
}

#[test]
fn test_missing_explicit_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = settings::resolve(Some(&dir.path().join("nope.yaml"))).unwrap_err();
    assert!(matches!(err, Error::SettingsNotFound { .. }));
}

#[test]
fn test_malformed_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "settings.yaml", "band: [1, 2\n");
    assert!(matches!(
        settings::resolve(Some(&path)),
        Err(Error::Settings(_))
    ));
}

// ============================================================================
// Pre-seeding from the process environment
// ============================================================================

#[test]
#[serial]
fn test_process_environment_overrides_file_value() {
    let _value = EnvGuard::set("portband_it_arangodb", "16001");
    let fixture = ConfigFixture::new("portband_it_arangodb: 15001\n");

    let options = LoadOptions::new(fixture.path(), &Settings::default());
    let loaded = load_configuration(&options).unwrap();
    assert_eq!(loaded.preseeded, vec!["portband_it_arangodb"]);
    assert_eq!(
        loaded
            .configuration
            .get("portband_it_arangodb")
            .unwrap()
            .raw_value(),
        "16001"
    );

    let ignored = load_configuration(&options.with_preseed(Preseed::Disabled)).unwrap();
    assert!(ignored.preseeded.is_empty());
    assert_eq!(
        ignored
            .configuration
            .get("portband_it_arangodb")
            .unwrap()
            .raw_value(),
        "15001"
    );
}
