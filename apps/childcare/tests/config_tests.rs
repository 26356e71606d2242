//! Settings loaded from files on disk.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use childcare::cli::open_workspace;
use childcare::config::{ConfigError, Settings};
use childcare_core::{Roster, StudentDetails, save_students};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Settings::load(dir.path(), Some(dir.path().join("absent.toml").as_path()));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_no_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(dir.path(), None).unwrap();
    assert_eq!(settings, Settings::defaults(dir.path()));
}

#[test]
fn test_configured_bands_drive_placement() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("childcare.toml");
    std::fs::write(
        &config,
        r#"
students_file = "roster.json"

[[bands]]
label = "Little Ones"
min_years = 0
max_years = 6
"#,
    )
    .unwrap();

    let settings = Settings::load(dir.path(), Some(config.as_path())).unwrap();
    let files = settings.data_files();
    assert_eq!(files.students, dir.path().join("roster.json"));

    // A five-year-old has no reference room but fits the configured band.
    let (registry, _) = settings.band_registry().unwrap();
    let mut roster = Roster::new(registry);
    let (_, result) = roster.enroll(
        StudentDetails::new("Harry", "Kane", NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()),
        today(),
    ).unwrap();
    assert_eq!(result.band(), Some("Little Ones"));
    save_students(&files.students, &roster).unwrap();

    let ws = open_workspace(&settings, today()).unwrap();
    assert_eq!(ws.roster.band_members("Little Ones").len(), 1);
}

#[test]
fn test_invalid_band_config_fails_workspace() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("childcare.toml");
    std::fs::write(
        &config,
        r#"
[[bands]]
label = ""
min_years = 0
max_years = 2
"#,
    )
    .unwrap();

    let settings = Settings::load(dir.path(), Some(config.as_path())).unwrap();
    assert!(open_workspace(&settings, today()).is_err());
}
