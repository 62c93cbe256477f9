//! Config file loading against real files.

use clap::Parser;
use copter_tracker::cli::{Args, CharacterSet};
use copter_tracker::config::{write_default, Config, ConfigError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");
    match Config::load(Some(&path)) {
        Err(ConfigError::NotFound { path: p }) => assert_eq!(p, path),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_invalid_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[filter]\nh_min = \"red\"\n").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_file_values_then_cli_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[filter]\nh_min = 20\nh_max = 40\n\n[display]\ncharset = \"minimal\"\n\n[guides]\ndelta_x = 80\n",
    )
    .unwrap();

    let mut config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.filter.h_min, 20);
    assert_eq!(config.guides.delta_x, 80);
    assert_eq!(config.guides.delta_y, 100);

    let args = Args::parse_from(["copter-tracker", "--h-max", "35", "--charset", "standard"]);
    config.apply_args(&args);
    assert_eq!(config.filter.h_min, 20);
    assert_eq!(config.filter.h_max, 35);
    assert_eq!(config.display.charset, CharacterSet::Standard);
}

#[test]
fn test_init_writes_loadable_template_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    write_default(&path).unwrap();
    assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());

    assert!(matches!(
        write_default(&path),
        Err(ConfigError::AlreadyExists { .. })
    ));
}
