//! Configuration file tests

use dashboard_cli::config::ConfigManager;
use std::fs;
use tempfile::TempDir;

fn manager(dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(dir.path().join("dashboard").join("config.toml"))
}

#[test]
fn test_set_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager(&dir);

    manager
        .set("client.api_url", "https://shop.example.com/graphql/")
        .unwrap();

    assert!(manager.get_config_path().exists());
    assert_eq!(
        manager.get("client.api_url").unwrap(),
        "https://shop.example.com/graphql/"
    );
}

#[test]
fn test_file_values_override_defaults_only_where_set() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager(&dir);

    manager.set("output.default_format", "json").unwrap();
    manager.set("output.spinner_enabled", "false").unwrap();

    let config = manager.load().unwrap();
    assert_eq!(config.output.default_format, "json");
    assert!(!config.output.spinner_enabled);
    assert!(config.output.color_enabled);
    assert_eq!(config.client.locale, "en");
}

#[test]
fn test_set_keeps_other_sections() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager(&dir);

    manager.set("client.locale", "pt-BR").unwrap();
    manager.set("output.color_enabled", "false").unwrap();

    let content = fs::read_to_string(manager.get_config_path()).unwrap();
    assert!(content.contains("[client]"));
    assert!(content.contains("locale = \"pt-BR\""));
    assert!(content.contains("[output]"));
    assert!(content.contains("color_enabled = false"));
}

#[test]
fn test_list_is_sorted_and_flattened() {
    let dir = TempDir::new().unwrap();
    let manager = manager(&dir);

    let items = manager.list().unwrap();
    let keys: Vec<&str> = items.iter().map(|(key, _)| key.as_str()).collect();

    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(keys.contains(&"client.api_url"));
    assert!(keys.contains(&"output.default_format"));
}

#[test]
fn test_invalid_values_are_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager(&dir);

    assert!(manager.set("client.timeout_seconds", "0").is_err());
    assert!(manager.set("client.locale", "en us").is_err());
    assert!(manager.set("output.default_format", "csv").is_err());
    assert!(manager.set("output.color_enabled", "maybe").is_err());
    assert!(!manager.get_config_path().exists());
}

#[test]
fn test_unknown_key_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(manager(&dir).get("client.nothing").is_err());
}
