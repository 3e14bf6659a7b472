use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A `dashboard` command isolated from the user's configuration
fn dashboard(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dashboard").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("DASHBOARD_CLIENT__API_URL")
        .env_remove("DASHBOARD_CLIENT__LOCALE");
    cmd
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_money_uses_english_by_default() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args(["money", "1234.5", "eur"])
        .assert()
        .success()
        .stdout("EUR 1,234.50\n");
}

#[test]
fn test_money_with_locale_flag() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args(["money", "1234.5", "EUR", "--locale", "de"])
        .assert()
        .success()
        .stdout("EUR 1.234,50\n");
}

#[test]
fn test_money_zero_decimal_currency() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args(["money", "1500", "JPY"])
        .assert()
        .success()
        .stdout("JPY 1,500\n");
}

#[test]
fn test_money_as_json() {
    let home = TempDir::new().unwrap();
    let output = dashboard(&home)
        .args(["--format", "json", "money", "12", "USD"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["currency"], "USD");
    assert_eq!(value["amount"], "12.00");
    assert_eq!(value["locale"], "en");
}

#[test]
fn test_invalid_amount_is_usage_error() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args(["money", "lots", "EUR"])
        .assert()
        .code(2);
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();

    dashboard(&home)
        .args(["config", "set", "client.locale", "pl"])
        .assert()
        .success();

    dashboard(&home)
        .args(["config", "get", "client.locale"])
        .assert()
        .success()
        .stdout("pl\n");

    let written = fs::read_to_string(home.path().join("dashboard/config.toml")).unwrap();
    assert!(written.contains("locale = \"pl\""));
}

#[test]
fn test_configured_locale_formats_money() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args(["config", "set", "client.locale", "de-DE"])
        .assert()
        .success();

    dashboard(&home)
        .args(["money", "99.9", "EUR"])
        .assert()
        .success()
        .stdout("EUR 99,90\n");
}

#[test]
fn test_config_rejects_invalid_url() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args(["config", "set", "client.api_url", "ftp://shop.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url"));
}

#[test]
fn test_unreachable_api_exits_with_network_code() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args(["--api-url", "http://127.0.0.1:9/graphql/", "taxes", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Network Error"));
}

#[test]
fn test_missing_change_file_is_input_error() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args([
            "product",
            "update",
            "UHJvZHVjdDox",
            "--changes",
            "/nonexistent/changes.json",
        ])
        .assert()
        .code(4);
}

#[test]
fn test_transaction_action_needs_confirmation_off_terminal() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args([
            "--api-url",
            "http://127.0.0.1:9/graphql/",
            "order",
            "transaction-action",
            "t1",
            "refund",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_rate_argument_is_validated() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args(["taxes", "update", "PL", "--rate", "books"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CLASS=RATE"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    dashboard(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"));
}
