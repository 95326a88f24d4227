//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get an lce command with no ambient configuration
///
/// HOME and XDG_CONFIG_HOME point into a scratch directory so a developer's
/// global config never leaks into assertions.
pub fn lce() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("lce"));
    cmd.env_remove("LCE_AUTHOR")
        .env_remove("LCE_EXCHANGE_RATE")
        .env_remove("LCE_SAMPLES")
        .env_remove("LCE_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Helper to get an lce command running inside a temp directory
pub fn lce_in(tmp: &TempDir) -> Command {
    let home = tmp.path().join(".home");
    fs::create_dir_all(&home).unwrap();
    let mut cmd = lce();
    cmd.current_dir(tmp.path())
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("LCE_AUTHOR", "test-author");
    cmd
}

/// Helper to create the reference shipment (`water-pumps.lce.yaml`)
pub fn setup_sample_shipment() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    lce_in(&tmp)
        .args(["new", "--title", "Water Pumps", "--sample"])
        .assert()
        .success();
    let path = tmp.path().join("water-pumps.lce.yaml");
    assert!(path.exists(), "sample shipment was not created");
    (tmp, path)
}

/// Helper to write a local `.lce/config.yaml`
pub fn write_local_config(dir: &Path, content: &str) {
    let config_dir = dir.join(".lce");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yaml"), content).unwrap();
}

/// Helper to rewrite one `key: value` line of a shipment file
pub fn replace_line(path: &Path, key: &str, new_value: &str) {
    let content = fs::read_to_string(path).unwrap();
    let prefix = format!("{}:", key);
    let updated: Vec<String> = content
        .lines()
        .map(|line| {
            if line.trim_start().starts_with(&prefix) {
                let indent = &line[..line.len() - line.trim_start().len()];
                format!("{}{}: {}", indent, key, new_value)
            } else {
                line.to_string()
            }
        })
        .collect();
    fs::write(path, updated.join("\n") + "\n").unwrap();
}
