use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("pickbot.toml");
    std::fs::write(&path, body).unwrap();
    path
}

fn pickbot() -> Command {
    Command::cargo_bin("pickbot_cli").unwrap()
}

#[test]
fn help_lists_subcommands() {
    pickbot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dispatch"))
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("self-check"));
}

#[test]
fn preview_prints_the_program_for_the_default_cell() {
    let dir = TempDir::new().unwrap();
    // An empty TOML means the shipped cell defaults.
    let cfg = write_config(&dir, "");
    let assert = pickbot()
        .args(["--config", cfg.to_str().unwrap(), "preview", "--slot", "2"])
        .assert()
        .success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(out.contains("def move_item_to_shipment_box():"));
    assert!(out.contains("go_to_xy(0.100, 0.100)"));
    assert!(out.contains("go_to_xy(0.300, 0.300)"));
    assert!(out.ends_with("move_item_to_shipment_box()\n"));
    assert!(!out.ends_with("\n\n"));
}

#[test]
fn preview_rejects_slot_zero_with_input_exit_code() {
    let dir = TempDir::new().unwrap();
    let cfg = write_config(&dir, "");
    pickbot()
        .args(["--config", cfg.to_str().unwrap(), "preview", "--slot", "0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("slot"));
}

#[test]
fn json_flag_yields_structured_error() {
    let dir = TempDir::new().unwrap();
    let cfg = write_config(&dir, "");
    pickbot()
        .args([
            "--config",
            cfg.to_str().unwrap(),
            "--json",
            "preview",
            "--slot",
            "0",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("InvalidInput"));
}

#[test]
fn invalid_sign_in_config_exits_with_configuration_code() {
    let dir = TempDir::new().unwrap();
    let cfg = write_config(&dir, "[grid]\nsign_x = 0\n");
    pickbot()
        .args(["--config", cfg.to_str().unwrap(), "self-check"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("sign_x"));
}

#[test]
fn inverted_heights_in_config_exit_with_configuration_code() {
    let dir = TempDir::new().unwrap();
    let cfg = write_config(&dir, "[heights]\nsafe_m = 0.010\ntouch_m = 0.015\n");
    pickbot()
        .args(["--config", cfg.to_str().unwrap(), "self-check"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("safe_m"));
}

#[test]
fn missing_config_file_is_reported() {
    pickbot()
        .args(["--config", "/nonexistent/pickbot.toml", "self-check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

#[test]
fn dispatch_rejects_a_malformed_host_before_touching_the_network() {
    let dir = TempDir::new().unwrap();
    let cfg = write_config(&dir, "");
    pickbot()
        .args([
            "--config",
            cfg.to_str().unwrap(),
            "dispatch",
            "--slot",
            "1",
            "--host",
            "not-an-ip",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("host"));
}

#[test]
fn self_check_reports_ok_with_defaults() {
    let dir = TempDir::new().unwrap();
    let cfg = write_config(&dir, "");
    pickbot()
        .args(["--config", cfg.to_str().unwrap(), "self-check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("self-check ok"));
}
