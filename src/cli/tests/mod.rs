//! Unit tests for the CLI module
//!
//! Covers the registry, argument validation, formatting and the commands
//! that fail before any connection is attempted.

#![allow(clippy::unwrap_used)]

use std::{net::TcpListener, time::Duration};

use toml::Value;

use crate::{
    cli::{
        CliError, CliService,
        formatting::{format_duration, format_toml_value},
    },
    config::Config,
};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Config pointing at a local port nobody listens on.
fn unreachable_config() -> Config {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut config = Config::default();
    config.connection.host = "127.0.0.1".to_string();
    config.connection.port = port;
    config.connection.timeout_secs = 1;
    config
}

#[test]
fn format_toml_value_scalars() {
    assert_eq!(format_toml_value(&Value::String("jazz".to_string())), "\"jazz\"");
    assert_eq!(format_toml_value(&Value::Integer(-3)), "-3");
    assert_eq!(format_toml_value(&Value::Float(2.5)), "2.5");
    assert_eq!(format_toml_value(&Value::Boolean(true)), "true");
}

#[test]
fn format_toml_value_array_lists_items() {
    let value = Value::Array(vec![Value::Integer(1), Value::String("a".to_string())]);
    assert_eq!(format_toml_value(&value), "[1, \"a\"]");
    assert_eq!(format_toml_value(&Value::Array(vec![])), "[]");
}

#[test]
fn format_toml_value_table_one_line_per_key() {
    let mut table = toml::map::Map::new();
    table.insert("host".to_string(), Value::String("pi".to_string()));
    table.insert("port".to_string(), Value::Integer(6600));

    assert_eq!(
        format_toml_value(&Value::Table(table)),
        "host = \"pi\"\nport = 6600"
    );
}

#[test]
fn format_duration_minutes_and_hours() {
    assert_eq!(format_duration(Duration::from_secs(0)), "0:00");
    assert_eq!(format_duration(Duration::from_millis(61_900)), "1:01");
    assert_eq!(format_duration(Duration::from_secs(3_725)), "1:02:05");
}

#[test]
fn registry_lists_both_categories() {
    let service = CliService::new(Config::default());
    let listing = service.list_all();

    let categories: Vec<&str> = listing.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(categories, vec!["config", "player"]);

    let player = &listing[1].1;
    for name in [
        "play",
        "pause",
        "stop",
        "next",
        "previous",
        "toggle",
        "volume",
        "volume-up",
        "volume-down",
        "status",
        "current",
        "load",
        "wait",
        "shutdown",
    ] {
        assert!(player.iter().any(|c| c == name), "missing {name}");
    }

    assert_eq!(listing[0].1, vec!["get", "schema"]);
}

#[test]
fn unknown_category_and_command() {
    let service = CliService::new(Config::default());

    let err = service.execute_command("mixer", "get", &[]).unwrap_err();
    assert!(matches!(err, CliError::CommandNotFound(_)));

    let err = service.execute_command("player", "rewind", &[]).unwrap_err();
    assert!(err.to_string().contains("'rewind'"));
}

#[test]
fn argument_count_is_validated() {
    let service = CliService::new(Config::default());

    let err = service.execute_command("player", "volume", &[]).unwrap_err();
    assert!(err.to_string().contains("at least 1"));

    let err = service
        .execute_command("player", "play", &args(&["now"]))
        .unwrap_err();
    assert!(err.to_string().contains("at most 0"));

    let err = service
        .execute_command("config", "get", &args(&["a", "b"]))
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidArguments(_)));
}

#[test]
fn volume_rejects_non_numeric_level_before_connecting() {
    let service = CliService::new(unreachable_config());

    let err = service
        .execute_command("player", "volume", &args(&["loud"]))
        .unwrap_err();

    assert!(matches!(err, CliError::InvalidArguments(ref m) if m.contains("'loud'")));
}

#[test]
fn wait_rejects_unknown_subsystem_before_connecting() {
    let service = CliService::new(unreachable_config());

    let err = service
        .execute_command("player", "wait", &args(&["player", "weather"]))
        .unwrap_err();

    assert!(err.to_string().contains("Unknown subsystem 'weather'"));
}

#[test]
fn player_command_reports_unreachable_daemon() {
    let service = CliService::new(unreachable_config());

    let err = service.execute_command("player", "play", &[]).unwrap_err();

    assert!(matches!(err, CliError::Player(_)));
    assert!(err.to_string().contains("Could not connect to '127.0.0.1'"));
}

#[test]
fn config_get_scalar_and_section() {
    let service = CliService::new(Config::default());

    let output = service
        .execute_command("config", "get", &args(&["connection.port"]))
        .unwrap();
    assert_eq!(output, "connection.port = 6600");

    let output = service
        .execute_command("config", "get", &args(&["player"]))
        .unwrap();
    assert!(output.starts_with("[player]\n"));
    assert!(output.contains("volume_step = 10"));
}

#[test]
fn config_get_masks_password() {
    let mut config = Config::default();
    config.connection.password = Some("hunter2".to_string());
    let service = CliService::new(config);

    let output = service
        .execute_command("config", "get", &args(&["connection"]))
        .unwrap();

    assert!(!output.contains("hunter2"));
    assert!(output.contains("password = \"***\""));
}

#[test]
fn config_get_unknown_path() {
    let service = CliService::new(Config::default());

    let err = service
        .execute_command("config", "get", &args(&["player.nope"]))
        .unwrap_err();

    assert!(matches!(err, CliError::ConfigError(_)));
}

#[test]
fn config_schema_is_json() {
    let service = CliService::new(Config::default());

    let schema = service.execute_command("config", "schema", &[]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&schema).unwrap();

    assert!(parsed.get("properties").is_some());
}

#[test]
fn help_lists_usage_and_filters_by_category() {
    let service = CliService::new(Config::default());

    let all = service.help(None).unwrap();
    assert!(all.contains("player volume <level>"));
    assert!(all.contains("player wait [subsystem...]"));
    assert!(all.contains("config get <path>"));

    let config_only = service.help(Some("config")).unwrap();
    assert!(!config_only.contains("player volume"));
    assert!(config_only.contains("pi-player config get connection.host"));

    assert!(service.help(Some("mixer")).is_err());
}
