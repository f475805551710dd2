// tests/config_test.rs
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;
use version_manager::config::{load_config, AppConfig, ReleaseConfig};
use version_manager::workflow::StepTimings;
use version_manager::VersionManagerError;

#[test]
fn test_load_fixture_file() {
    let config = load_config(Some(Path::new("tests/fixtures/versionmanager.toml"))).unwrap();

    assert_eq!(config.behavior.min_step_duration(), Duration::from_millis(500));
    assert_eq!(
        config.behavior.protected_branches,
        vec!["main".to_string(), "release".to_string()]
    );
    assert_eq!(
        config.behavior.prerelease_branches,
        vec!["stage".to_string(), "beta".to_string()]
    );
    assert_eq!(config.release.gitlab_api_url, "https://gitlab.example.com/api/v4");
    // Not in the file
    assert_eq!(config.release.github_api_url, "https://api.github.com");
    assert_eq!(config.release.timeout_secs, 10);
    assert_eq!(config.logging.level, "info");

    let timings = StepTimings::from(&config.behavior);
    assert_eq!(timings.default, Duration::from_millis(500));
    assert_eq!(timings.tag_push, Duration::from_millis(1500));
}

#[test]
fn test_empty_file_gives_defaults() {
    let temp_file = NamedTempFile::new().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.release, ReleaseConfig::default());
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[behavior\nmin_step_duration_ms = 1")
        .unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path())).unwrap_err();
    assert!(matches!(err, VersionManagerError::Config(_)));
}

#[test]
fn test_wrong_value_type_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[release]\ntimeout_secs = \"soon\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path())).is_err());
}

#[test]
fn test_missing_explicit_file_is_error() {
    let err = load_config(Some(Path::new("does/not/exist.toml"))).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.toml"));
}
