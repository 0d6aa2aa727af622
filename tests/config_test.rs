//! Tests for config loading

use serial_test::serial;
use std::path::{Path, PathBuf};
use std::time::Duration;

use shiftplan::config::Config;

const ENV_VARS: [&str; 11] = [
    "SHIFTPLAN_OPTIMIZER_URL",
    "SHIFTPLAN_OPTIMIZER_ENABLED",
    "SHIFTPLAN_HEALTH_TIMEOUT",
    "SHIFTPLAN_REQUEST_TIMEOUT",
    "SHIFTPLAN_RETRY_COUNT",
    "SHIFTPLAN_RETRY_DELAY_MS",
    "SHIFTPLAN_DATA_DIR",
    "SHIFTPLAN_HEURISTIC_ONLY",
    "SHIFTPLAN_PERIOD",
    "SHIFTPLAN_LOG_LEVEL",
    "SHIFTPLAN_LOG_FORMAT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_config_file_exists() {
    let config_path = Path::new("config.toml");
    assert!(
        config_path.exists(),
        "config.toml should exist in project root"
    );
}

#[test]
fn test_config_toml_sections() {
    let content =
        std::fs::read_to_string("config.toml").expect("Should be able to read config.toml");

    for section in ["[optimizer]", "[storage]", "[scheduling]", "[logging]"] {
        assert!(
            content.contains(section),
            "config.toml should have {section} section"
        );
    }
}

#[test]
fn test_shipped_config_matches_defaults() {
    let config = Config::load(Some(Path::new("config.toml"))).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = Config::load(None).unwrap();
    assert_eq!(config.optimizer.url, "http://localhost:8000");
    assert!(config.optimizer.enabled);
    assert_eq!(config.health_timeout(), Duration::from_secs(2));
    assert_eq!(config.storage.data_dir, PathBuf::from("data"));
    assert!(!config.scheduling.heuristic_only);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("SHIFTPLAN_OPTIMIZER_URL", "https://solver.internal:9000");
    std::env::set_var("SHIFTPLAN_OPTIMIZER_ENABLED", "no");
    std::env::set_var("SHIFTPLAN_RETRY_COUNT", "5");
    std::env::set_var("SHIFTPLAN_DATA_DIR", "/var/lib/shiftplan");
    std::env::set_var("SHIFTPLAN_HEURISTIC_ONLY", "true");
    std::env::set_var("SHIFTPLAN_PERIOD", "2025-07-01/2025-07-07");

    let config = Config::load(None).unwrap();
    clear_env();

    assert_eq!(config.optimizer.url, "https://solver.internal:9000");
    assert!(!config.optimizer.enabled);
    assert_eq!(config.optimizer.retry_count, 5);
    assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/shiftplan"));
    assert!(config.scheduling.heuristic_only);
    assert_eq!(config.scheduling.period.as_deref(), Some("2025-07-01/2025-07-07"));
    assert_eq!(config.client_config().retry_count, 5);
}

#[test]
#[serial]
fn test_unparseable_numbers_fall_back_to_defaults() {
    clear_env();
    std::env::set_var("SHIFTPLAN_REQUEST_TIMEOUT", "soon");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.request_timeout(), Duration::from_secs(30));
}

#[test]
#[serial]
fn test_invalid_env_values_fail_validation() {
    clear_env();
    std::env::set_var("SHIFTPLAN_LOG_FORMAT", "xml");

    let result = Config::load(None);
    clear_env();

    assert!(result.is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_file_with_bad_period_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[scheduling]\nperiod = \"2025-07-07/2025-07-01\"\n").unwrap();

    assert!(Config::load(Some(&path)).is_err());
}
