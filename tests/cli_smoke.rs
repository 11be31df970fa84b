//! Smoke tests for the flexprobe CLI.
//!
//! These validate argument parsing, configuration errors, and the offline
//! dashboard command without requiring a reachable platform or API token.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn flexprobe() -> Command {
    Command::cargo_bin("flexprobe").expect("flexprobe binary should build")
}

#[test]
fn test_help_lists_subcommands() {
    flexprobe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reload"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_missing_configuration_exits_with_config_error() {
    let dir = TempDir::new().unwrap();

    flexprobe()
        .current_dir(dir.path())
        .env_remove("FLEXPROBE_TOKEN")
        .arg("query")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("hostname"));
}

#[test]
fn test_missing_token_names_the_variable() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("flexprobe.toml"),
        r#"
hostname = "https://demo.cloud.example.com"
token_env = "FLEXPROBE_SMOKE_TOKEN_ABSENT"
workspace_id = "ws"
data_source_id = "ds"
"#,
    )
    .unwrap();

    flexprobe()
        .current_dir(dir.path())
        .env_remove("FLEXPROBE_SMOKE_TOKEN_ABSENT")
        .arg("query")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("FLEXPROBE_SMOKE_TOKEN_ABSENT"));
}

#[test]
fn test_dashboard_prints_embed_snippet() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("flexprobe.toml");
    fs::write(
        &config_path,
        r#"
hostname = "https://demo.cloud.example.com"
workspace_id = "ws"
data_source_id = "ds"

[dashboard]
dashboard_id = "dash-abc"
component_id = "comp-xyz"
"#,
    )
    .unwrap();

    flexprobe()
        .env("FLEXPROBE_TOKEN", "smoke-token")
        .arg("--config")
        .arg(&config_path)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("gd-dashboard"))
        .stdout(predicate::str::contains("dash-abc"))
        .stdout(predicate::str::contains("comp-xyz.js?auth=sso"));
}

#[test]
fn test_dashboard_records_load_time_events() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("flexprobe.toml");
    fs::write(
        &config_path,
        r#"
hostname = "https://demo.cloud.example.com"
workspace_id = "ws"
data_source_id = "ds"

[dashboard]
dashboard_id = "dash-abc"
component_id = "comp-xyz"
"#,
    )
    .unwrap();

    flexprobe()
        .env("FLEXPROBE_TOKEN", "smoke-token")
        .arg("--config")
        .arg(&config_path)
        .arg("dashboard")
        .arg("--event")
        .arg(r#"{"type": "Initialization", "loadTime": 812.4}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("initialization: 812.40 ms"));
}

#[test]
fn test_dashboard_rejects_malformed_event() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("flexprobe.toml");
    fs::write(
        &config_path,
        r#"
hostname = "https://demo.cloud.example.com"
workspace_id = "ws"
data_source_id = "ds"

[dashboard]
dashboard_id = "dash-abc"
component_id = "comp-xyz"
"#,
    )
    .unwrap();

    flexprobe()
        .env("FLEXPROBE_TOKEN", "smoke-token")
        .arg("--config")
        .arg(&config_path)
        .arg("dashboard")
        .arg("--event")
        .arg("not json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid dashboard event"));
}

#[test]
fn test_dashboard_without_section_is_config_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("flexprobe.toml");
    fs::write(
        &config_path,
        r#"
hostname = "https://demo.cloud.example.com"
workspace_id = "ws"
data_source_id = "ds"
"#,
    )
    .unwrap();

    flexprobe()
        .env("FLEXPROBE_TOKEN", "smoke-token")
        .arg("--config")
        .arg(&config_path)
        .arg("dashboard")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[dashboard]"));
}
