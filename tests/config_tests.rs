//! Configuration loading from files on disk.

mod support;

use std::fs;

use ipowatch::domain::entity::Category;
use ipowatch::error::{ConfigError, Error};
use ipowatch::infrastructure::config::fallback::load_fallback;
use ipowatch::infrastructure::config::settings::Config;
use support::config::{TempConfig, MINIMAL};

#[test]
fn config_loads_from_file() {
    let file = TempConfig::write(MINIMAL);

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.database, "ipowatch-test.db");
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.dispatch.max_batch_size, 3);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn config_rejects_invalid_minute() {
    let file = TempConfig::write("[dispatch]\nnotify_minute = 75\n");

    let err = Config::load(file.path()).unwrap_err();

    assert!(
        err.to_string().contains("notify_minute"),
        "unexpected error: {err}"
    );
}

#[test]
fn config_rejects_blank_database() {
    let file = TempConfig::write("database = \"  \"\n");

    let err = Config::load(file.path()).unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingField { field: "database" })
    ));
}

#[test]
fn config_rejects_offset_beyond_fourteen_hours() {
    let file = TempConfig::write("[dispatch]\nutc_offset_minutes = -900\n");

    assert!(Config::load(file.path()).is_err());
}

#[test]
fn malformed_toml_is_parse_error() {
    let file = TempConfig::write("[dispatch\nnotify_hour = 9\n");

    let err = Config::load(file.path()).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn builtin_fallback_table_has_reference_listings() {
    let table = load_fallback(None).unwrap();

    let names: Vec<&str> = table
        .get(Category::Offerings)
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Green Energy Ltd", "TechNova Solutions"]);
    assert_eq!(table.get(Category::Headlines).len(), 2);
}

#[test]
fn custom_fallback_file_replaces_builtin() {
    let file = TempConfig::write(MINIMAL);
    let fallback_path = file.dir().join("fallback.toml");
    fs::write(
        &fallback_path,
        r#"
[[offerings]]
name = "Holiday Listing Ltd"
price_band = "100-110"
lot_size = 120

[[headlines]]
title = "Exchange closed for holiday"

[[quotes]]
symbol = "tcs"
price = 3900
"#,
    )
    .unwrap();

    let table = load_fallback(Some(&fallback_path)).unwrap();

    assert_eq!(table.get(Category::Offerings)[0].name, "Holiday Listing Ltd");
    assert_eq!(table.get(Category::Headlines)[0].name, "Exchange closed for holiday");
    assert_eq!(table.get(Category::Quotes)[0].name, "TCS");
}

#[test]
fn fallback_file_without_offerings_is_rejected() {
    let file = TempConfig::write(MINIMAL);
    let fallback_path = file.dir().join("fallback.toml");
    fs::write(&fallback_path, "[[headlines]]\ntitle = \"x\"\n").unwrap();

    let err = load_fallback(Some(&fallback_path)).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { field: "offerings", .. }));
}

#[test]
fn quotes_category_requires_watchlist() {
    let file = TempConfig::write("[dispatch]\ncategories = [\"quotes\"]\n");

    let err = Config::load(file.path()).unwrap_err();

    assert!(err.to_string().contains("watchlist"), "unexpected error: {err}");
}

#[test]
fn missing_fallback_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = load_fallback(Some(&dir.path().join("nope.toml"))).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile(_)));
}
