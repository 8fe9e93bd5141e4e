//! Configuration persistence round-trips through real files.

use lathesim_settings::LatheConfig;
use tempfile::TempDir;

#[test]
fn toml_roundtrip_preserves_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = LatheConfig::default();
    config.connection.port = "/dev/ttyACM0".to_string();
    config.simulation.stock_diameter_in = 1.5;
    config.force.wall_stiffness = 900.0;

    config.save_to_file(&path).unwrap();
    let loaded = LatheConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn json_roundtrip_preserves_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = LatheConfig::default();
    config.connection.baud_rate = 9600;
    config.force.max_force_n = 40.0;

    config.save_to_file(&path).unwrap();
    let loaded = LatheConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn unknown_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    assert!(LatheConfig::default().save_to_file(&path).is_err());
    assert!(LatheConfig::load_from_file(&path).is_err());
}

#[test]
fn invalid_file_content_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "not valid toml [[[").unwrap();
    assert!(LatheConfig::load_from_file(&path).is_err());
}

#[test]
fn invalid_values_rejected_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = LatheConfig::default();
    config.connection.timeout_ms = 0;
    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}
