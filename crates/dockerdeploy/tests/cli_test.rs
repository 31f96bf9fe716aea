#![allow(deprecated)] // TODO: move from Command::cargo_bin to the cargo_bin_cmd! macro

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Binary pointed at a throwaway config file
fn dockerdeploy(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dockerdeploy").unwrap();
    cmd.env("DOCKERDEPLOY_CONFIG_PATH", config_path(config_dir))
        .env_remove("DOCKERDEPLOY_API_TOKEN")
        .env("DOCKERDEPLOY_API_URL", "http://127.0.0.1:9")
        .current_dir(config_dir.path());
    cmd
}

fn config_path(config_dir: &TempDir) -> PathBuf {
    config_dir.path().join("config.json")
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("dockerdeploy").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("dockerdeploy").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dockerdeploy"));
}

#[test]
fn test_publish_help_lists_flags() {
    let mut cmd = Command::cargo_bin("dockerdeploy").unwrap();
    cmd.args(["publish", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--version"))
        .stdout(predicate::str::contains("--yes"));
}

#[test]
fn test_deploy_without_publish_prints_guidance() {
    let dir = tempfile::tempdir().unwrap();

    dockerdeploy(&dir)
        .arg("deploy")
        .assert()
        .success()
        .stdout(predicate::str::contains("No published image found"))
        .stdout(predicate::str::contains("dockerdeploy publish"));

    assert!(!config_path(&dir).exists());
}

#[test]
fn test_publish_with_missing_dockerfile() {
    let dir = tempfile::tempdir().unwrap();

    dockerdeploy(&dir)
        .args(["publish", "--file", "does-not-exist/Dockerfile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dockerfile not found"))
        .stdout(predicate::str::contains("--file"));

    assert!(!config_path(&dir).exists());
}

#[test]
fn test_set_token_then_show_masks_it() {
    let dir = tempfile::tempdir().unwrap();

    dockerdeploy(&dir)
        .args(["config", "set-token", "dd_live_0123456789"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API token saved"));

    let saved = fs::read_to_string(config_path(&dir)).unwrap();
    assert!(saved.contains("\"apiToken\": \"dd_live_0123456789\""));

    dockerdeploy(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dd_l****"))
        .stdout(predicate::str::contains("dd_live_0123456789").not());
}

#[test]
fn test_empty_token_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    dockerdeploy(&dir)
        .args(["config", "set-token", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_reset_forgets_published_image() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        config_path(&dir),
        r#"{"imageName":"myapp","tagBase":"registry.dockerdeploy.cloud/alice/myapp","apiToken":"tok"}"#,
    )
    .unwrap();

    dockerdeploy(&dir)
        .args(["config", "reset"])
        .assert()
        .success();

    let saved = fs::read_to_string(config_path(&dir)).unwrap();
    assert!(!saved.contains("tagBase"));
    assert!(!saved.contains("imageName"));
    assert!(saved.contains("apiToken"));

    dockerdeploy(&dir)
        .arg("deploy")
        .assert()
        .success()
        .stdout(predicate::str::contains("No published image found"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(config_path(&dir), "{ not json").unwrap();

    dockerdeploy(&dir).arg("deploy").assert().failure();
}
