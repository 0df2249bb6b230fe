use std::fs;
use std::time::Duration;

use propedge::app::Config;
use propedge::error::{ConfigError, Error};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("propedge.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn full_config_round_trips_every_section() {
    let dir = TempDir::new().unwrap();
    let favorites = dir.path().join("favs.json");
    let toml = format!(
        r#"
[source]
api_url = "http://props.internal:8080"
timeout_secs = 10
scrape_timeout_secs = 900

[refresh]
enabled = false
interval_secs = 60

[favorites]
path = "{}"

[stake]
default_total = 250.0

[logging]
level = "debug"
format = "json"
"#,
        favorites.display()
    );
    let path = write_config(&dir, &toml);

    let config = Config::load(&path).unwrap();
    assert_eq!(config.source.timeout(), Duration::from_secs(10));
    assert_eq!(config.source.scrape_timeout(), Duration::from_secs(900));
    assert!(!config.refresh.enabled);
    assert_eq!(config.refresh.interval(), Duration::from_secs(60));
    assert_eq!(config.favorites.resolved_path(), favorites);
    assert_eq!(config.stake.default_total, 250.0);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert!(config.refresh.enabled);
    assert_eq!(config.refresh.interval(), Duration::from_secs(300));
    assert_eq!(config.source.scrape_timeout(), Duration::from_secs(600));
}

#[test]
fn load_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[source\napi_url = ");
    let result = Config::load(&path);
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn zero_timeout_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[source]\ntimeout_secs = 0\n");

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "timeout_secs",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid timeout error, got {err}"),
        Ok(_) => panic!("Expected invalid timeout error, got Ok"),
    }
}
