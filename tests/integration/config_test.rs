//! Integration tests for configuration files.

use ridemetrics::config::{load_config, save_config, AppConfig};
use ridemetrics::metrics::Gender;
use tempfile::TempDir;

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.athlete.ftp = Some(280.0);
    config.athlete.gender = Gender::Female;
    config.analysis.graph_points = 60;
    save_config(&config, &path).unwrap();

    let loaded = load_config(Some(&path)).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(loaded, AppConfig::default());
}

#[test]
fn test_partial_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[athlete]\nftp = 310.0\n\n[analysis]\nideal_gap = 2.0\n").unwrap();

    let loaded = load_config(Some(&path)).unwrap();
    assert_eq!(loaded.athlete.ftp, Some(310.0));
    assert_eq!(loaded.athlete.gender, Gender::Male);
    assert_eq!(loaded.analysis.ideal_gap, Some(2.0));
    assert_eq!(loaded.analysis.graph_points, 120);
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[athlete\nftp = ").unwrap();
    assert!(load_config(Some(&path)).is_err());
}
