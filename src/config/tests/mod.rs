//! Unit tests for config module
//!
//! Tests configuration types, defaults, validation and path lookup.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::time::Duration;

use crate::config::{Config, ConfigPaths, LogLevel};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.connection.host, "localhost");
    assert_eq!(config.connection.port, 6600);
    assert_eq!(config.connection.password, None);
    assert_eq!(config.connection.timeout(), Duration::from_secs(10));
    assert_eq!(config.connection.idle_timeout(), None);
    assert_eq!(config.player.volume_step, 10);
    assert_eq!(config.player.playlist, "playlist");
    assert_eq!(config.general.log_level, LogLevel::Info);
}

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[connection]"));
    assert!(toml_str.contains("[player]"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [connection]
        host = "pi.local"
        port = 6601
        password = "secret"
        idle_timeout_secs = 30

        [player]
        volume_step = 5
        playlist = "radio"
    "#;

    let config = Config::from_toml_str(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.connection.host, "pi.local");
    assert_eq!(config.connection.port, 6601);
    assert_eq!(config.connection.password.as_deref(), Some("secret"));
    assert_eq!(config.connection.timeout_secs, 10);
    assert_eq!(config.connection.idle_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.player.volume_step, 5);
    assert_eq!(config.player.playlist, "radio");
}

#[test]
fn config_partial_sections_keep_defaults() {
    let config = Config::from_toml_str(
        r#"
        [connection]
        host = "10.0.0.2"
    "#,
    )
    .unwrap();

    assert_eq!(config.connection.host, "10.0.0.2");
    assert_eq!(config.connection.port, 6600);
    assert_eq!(config.player.playlist, "playlist");
}

#[test]
fn config_empty_toml() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config.connection.host, "localhost");
}

#[test]
fn config_invalid_toml() {
    let result = Config::from_toml_str(
        r#"
        [general
        invalid syntax here
    "#,
    );

    let err = result.unwrap_err().to_string();
    assert!(err.contains("failed to parse TOML at 'string'"));
}

#[test]
fn config_rejects_zero_volume_step() {
    let err = Config::from_toml_str("[player]\nvolume_step = 0")
        .unwrap_err()
        .to_string();

    assert!(err.contains("'player'"));
    assert!(err.contains("volume_step"));
}

#[test]
fn config_rejects_empty_host() {
    let err = Config::from_toml_str("[connection]\nhost = \"  \"")
        .unwrap_err()
        .to_string();

    assert!(err.contains("host must not be empty"));
}

#[test]
fn config_rejects_zero_port() {
    assert!(Config::from_toml_str("[connection]\nport = 0").is_err());
}

#[test]
fn config_rejects_zero_timeout() {
    let err = Config::from_toml_str("[connection]\ntimeout_secs = 0")
        .unwrap_err()
        .to_string();

    assert!(err.contains("timeout_secs"));
}

#[test]
fn config_rejects_zero_idle_timeout() {
    let err = Config::from_toml_str("[connection]\nidle_timeout_secs = 0")
        .unwrap_err()
        .to_string();

    assert!(err.contains("idle_timeout_secs"));
    assert!(Config::from_toml_str("[connection]\nidle_timeout_secs = 1").is_ok());
}

#[test]
fn get_by_path_returns_nested_values() {
    let config = Config::default();

    assert_eq!(
        config.get_by_path("connection.port").unwrap(),
        toml::Value::Integer(6600)
    );
    assert_eq!(
        config.get_by_path("player.playlist").unwrap(),
        toml::Value::String("playlist".to_string())
    );
    assert!(config.get_by_path("player").unwrap().is_table());
}

#[test]
fn get_by_path_masks_password() {
    let mut config = Config::default();
    config.connection.password = Some("hunter2".to_string());

    let value = config.get_by_path("connection.password").unwrap();
    assert_eq!(value.as_str(), Some("***"));

    let section = config.get_by_path("connection").unwrap();
    assert!(!section.to_string().contains("hunter2"));
}

#[test]
fn get_by_path_unknown_key() {
    let err = Config::default()
        .get_by_path("connection.nope")
        .unwrap_err()
        .to_string();

    assert!(err.contains("no such key 'nope'"));
}

#[test]
fn debug_output_hides_password() {
    let mut config = Config::default();
    config.connection.password = Some("hunter2".to_string());

    let debug_str = format!("{config:?}");
    assert!(!debug_str.contains("hunter2"));
    assert!(debug_str.contains("***"));
}

#[test]
fn schema_describes_all_sections() {
    let schema = Config::schema().unwrap();

    assert!(schema.contains("connection"));
    assert!(schema.contains("volume_step"));
    assert!(schema.contains("log_level"));
}

#[test]
fn config_paths_valid() {
    if std::env::var("HOME").is_ok() || std::env::var("XDG_CONFIG_HOME").is_ok() {
        let main_path = ConfigPaths::main_config().unwrap();

        assert!(main_path.to_string_lossy().ends_with("pi-player/config.toml"));
        assert_eq!(main_path.parent(), Some(ConfigPaths::config_dir().unwrap().as_path()));
    }
}
