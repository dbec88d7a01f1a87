//! Configuration file loading.

use std::fs;

use tempfile::TempDir;
use tradewatch::error::{ConfigError, Error};
use tradewatch::infrastructure::config::settings::Config;

#[test]
fn loads_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[storage]\npath = \"data/traders.json\"\n\n[reconnection]\nmax_consecutive_failures = 4\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.storage.path, std::path::PathBuf::from("data/traders.json"));
    assert_eq!(config.reconnection.max_consecutive_failures, 4);
    assert_eq!(config.feed.ws_url, "wss://api.hyperliquid.xyz/ws");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    let result = Config::load(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn missing_default_file_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let config = Config::load_or_default(dir.path().join("config.toml")).unwrap();

    assert_eq!(config.telegram.queue_capacity, 256);
    assert_eq!(config.reconnection.initial_delay_ms, 1000);
}

#[test]
fn invalid_existing_default_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[telegram]\nsend_timeout_secs = 0\n").unwrap();

    let result = Config::load_or_default(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "send_timeout_secs",
            ..
        }))
    ));
}

#[test]
fn example_config_is_valid() {
    let content = include_str!("../config.example.toml");
    Config::parse_toml(content).expect("example config parses");
}
