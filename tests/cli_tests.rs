use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn propedge(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("propedge").expect("binary built");
    cmd.current_dir(dir.path())
        .env_remove("PROPEDGE_API_URL")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    propedge(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("view"))
        .stdout(predicate::str::contains("stake"))
        .stdout(predicate::str::contains("favorite"));
}

#[test]
fn stake_splits_a_balanced_bet() {
    let dir = TempDir::new().unwrap();
    propedge(&dir)
        .args(["stake", "+150", "-170", "--total", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("38.85"))
        .stdout(predicate::str::contains("61.15"));
}

#[test]
fn stake_json_output_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let output = propedge(&dir)
        .args(["--json", "stake", "120", "-105"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "stake");
    assert_eq!(value["total_stake"], 100.0);
    assert!(value["arbitrage_percent"].as_f64().unwrap() > 0.0);
}

#[test]
fn zero_odds_are_rejected() {
    let dir = TempDir::new().unwrap();
    propedge(&dir)
        .args(["stake", "0", "-110"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid American odds"));
}

#[test]
fn favorites_toggle_persists_to_the_configured_file() {
    let dir = TempDir::new().unwrap();
    let favorites = dir.path().join("favorites.json");
    fs::write(
        dir.path().join("propedge.toml"),
        format!("[favorites]\npath = \"{}\"\n", favorites.display()),
    )
    .unwrap();

    propedge(&dir)
        .args(["favorite", "toggle", "LeBron James", "points"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));

    let saved = fs::read_to_string(&favorites).unwrap();
    assert!(saved.contains("LeBron James-points"));

    propedge(&dir)
        .args(["favorite", "toggle", "LeBron James", "points"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    let saved = fs::read_to_string(&favorites).unwrap();
    assert!(!saved.contains("LeBron James-points"));
}

#[test]
fn invalid_config_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("propedge.toml"), "[refresh]\ninterval_secs = 0\n").unwrap();

    propedge(&dir)
        .args(["stake", "150", "-170"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval_secs"));
}
