//! The `alaunch` binary.
//!
//! Commands that hit the network run the blocking `assert_cmd` call on a
//! blocking thread so the local server keeps serving on the runtime.

use crate::common::{exe_name, game_zip, publish, read_record, write_config};
use alaunch_cli::test_utils::TestServer;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn alaunch(config: Option<&PathBuf>) -> Command {
    let mut cmd = Command::cargo_bin("alaunch").unwrap();
    cmd.env_remove("ALAUNCH_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--no-progress");
    if let Some(config) = config {
        cmd.arg("--config").arg(config);
    }
    cmd
}

#[test]
fn test_help_lists_commands() {
    alaunch(None)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_missing_config_file_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.toml");

    alaunch(Some(&missing))
        .current_dir(temp.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("launcher.toml");
    std::fs::write(
        &config,
        "artifact_name = \"Dominion\"\nversion_url = \"ftp://x/v.txt\"\narchive_url = \"https://x/D.zip\"\n",
    )
    .unwrap();

    alaunch(Some(&config))
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
}

#[tokio::test]
async fn test_status_before_install() {
    let server = TestServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server, temp.path());

    alaunch(Some(&config))
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dominion"))
        .stdout(predicate::str::contains("not installed"));
}

#[tokio::test]
async fn test_status_json_reads_record() {
    let server = TestServer::start().await;
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("version.txt"), "3.2.1\n").unwrap();
    let config = write_config(temp.path(), &server, temp.path());

    let output = alaunch(Some(&config)).args(["status", "--format", "json"]).assert().success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["artifact_name"], "Dominion");
    assert_eq!(json["installed_version"], "3.2.1");
    assert_eq!(json["executable_present"], false);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_check_installs_then_reports_up_to_date() {
    let server = TestServer::start().await;
    let temp = TempDir::new().unwrap();
    publish(&server, "1.0.0", game_zip("build"));
    let root = temp.path().join("game");
    let config = write_config(temp.path(), &server, &root);

    let cfg = config.clone();
    tokio::task::spawn_blocking(move || {
        alaunch(Some(&cfg))
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("Installed version 1.0.0"));
    })
    .await
    .unwrap();

    assert_eq!(read_record(&root).as_deref(), Some("1.0.0"));
    assert!(root.join("Build").join(exe_name()).exists());

    tokio::task::spawn_blocking(move || {
        alaunch(Some(&config))
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("up to date"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_check_failure_exits_nonzero_and_keeps_record() {
    let server = TestServer::start().await;
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("version.txt"), "1.0.0").unwrap();
    server.respond("/version.txt", 200, "1.1.0");
    server.respond("/Dominion.zip", 200, "definitely not a zip");
    let config = write_config(temp.path(), &server, temp.path());

    tokio::task::spawn_blocking(move || {
        alaunch(Some(&config))
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Update failed - Retry"));
    })
    .await
    .unwrap();

    assert_eq!(read_record(temp.path()).as_deref(), Some("1.0.0"));
    assert!(!temp.path().join("Dominion.zip").exists());
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_play_installs_and_launches() {
    let server = TestServer::start().await;
    let temp = TempDir::new().unwrap();
    publish(&server, "2.0.0", game_zip("#!/bin/sh\ntouch played\n"));
    let config = write_config(temp.path(), &server, temp.path());

    tokio::task::spawn_blocking(move || {
        alaunch(Some(&config))
            .arg("play")
            .assert()
            .success()
            .stdout(predicate::str::contains("Launched"));
    })
    .await
    .unwrap();

    assert_eq!(read_record(temp.path()).as_deref(), Some("2.0.0"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_play_tells_user_to_retry_on_failure() {
    let server = TestServer::start().await;
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("version.txt"), "1.0.0").unwrap();
    server.respond("/version.txt", 503, "maintenance");
    let config = write_config(temp.path(), &server, temp.path());

    tokio::task::spawn_blocking(move || {
        alaunch(Some(&config))
            .arg("play")
            .assert()
            .failure()
            .stderr(predicate::str::contains("alaunch play"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quiet_check_prints_nothing_on_success() {
    let server = TestServer::start().await;
    let temp = TempDir::new().unwrap();
    publish(&server, "1.0.0", game_zip("build"));
    let config = write_config(temp.path(), &server, temp.path());

    tokio::task::spawn_blocking(move || {
        alaunch(Some(&config)).args(["--quiet", "check"]).assert().success().stdout("");
    })
    .await
    .unwrap();

    assert_eq!(read_record(temp.path()).as_deref(), Some("1.0.0"));
}
