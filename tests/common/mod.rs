//! Common helpers for alaunch integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use alaunch_cli::config::LauncherConfig;
use alaunch_cli::test_utils::{TestServer, ZipBuilder};
use std::path::{Path, PathBuf};

pub const ARTIFACT: &str = "Dominion";

pub fn exe_name() -> String {
    format!("{ARTIFACT}{}", std::env::consts::EXE_SUFFIX)
}

/// Archive with a `Build/` tree whose executable contains `contents`.
pub fn game_zip(contents: &str) -> Vec<u8> {
    ZipBuilder::new()
        .dir("Build/")
        .executable(&format!("Build/{}", exe_name()), contents)
        .file("Build/Data/level1.dat", "level data")
        .build()
}

/// Publish `version` and an archive on `server`.
pub fn publish(server: &TestServer, version: &str, archive: Vec<u8>) {
    server.respond("/version.txt", 200, version);
    server.respond(&format!("/{ARTIFACT}.zip"), 200, archive);
}

pub fn config_for(server: &TestServer, root: &Path) -> LauncherConfig {
    LauncherConfig::new(
        ARTIFACT,
        server.url("/version.txt"),
        server.url(&format!("/{ARTIFACT}.zip")),
    )
    .with_install_root(root)
}

/// Write a `launcher.toml` for `server` into `dir` and return its path.
pub fn write_config(dir: &Path, server: &TestServer, root: &Path) -> PathBuf {
    let path = dir.join("launcher.toml");
    let content = toml::to_string_pretty(&config_for(server, root)).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

pub fn read_record(root: &Path) -> Option<String> {
    std::fs::read_to_string(root.join("version.txt")).ok()
}
