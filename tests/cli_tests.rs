//! CLI surface tests - help, new, params, config, completions

mod common;

use common::{lce, lce_in, setup_sample_shipment, write_local_config};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help_displays() {
    lce()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Landed Cost Engine"))
        .stdout(predicate::str::contains("calc"))
        .stdout(predicate::str::contains("correlate"));
}

#[test]
fn test_version_displays() {
    lce()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lce"));
}

#[test]
fn test_unknown_command_fails() {
    lce().arg("frobnicate").assert().failure();
}

// ============================================================================
// New Command Tests
// ============================================================================

#[test]
fn test_new_creates_file_from_template() {
    let (_tmp, path) = setup_sample_shipment();
    let content = fs::read_to_string(&path).unwrap();

    assert!(content.contains("id: SHP-"));
    assert!(content.contains("title: \"Water Pumps\""));
    assert!(content.contains("fob_usd: 15000"));
    assert!(content.contains("author: \"test-author\""));
    assert!(content.contains("# Run `lce calc water-pumps.lce.yaml`"));
}

#[test]
fn test_new_uses_config_exchange_rate() {
    let tmp = TempDir::new().unwrap();
    write_local_config(tmp.path(), "default_exchange_rate: 130.25\n");

    lce_in(&tmp)
        .args(["new", "--title", "Tyres", "--fob", "2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created shipment"));

    let content = fs::read_to_string(tmp.path().join("tyres.lce.yaml")).unwrap();
    assert!(content.contains("exchange_rate: 130.25"));
    assert!(content.contains("fob_usd: 2000"));
}

#[test]
fn test_new_exchange_rate_from_env() {
    let tmp = TempDir::new().unwrap();
    lce_in(&tmp)
        .env("LCE_EXCHANGE_RATE", "140")
        .args(["new", "--title", "Cables"])
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("cables.lce.yaml")).unwrap();
    assert!(content.contains("exchange_rate: 140"));
}

#[test]
fn test_new_with_supplier_and_output() {
    let tmp = TempDir::new().unwrap();
    lce_in(&tmp)
        .args([
            "new",
            "--title",
            "Solar Panels",
            "--supplier",
            "Shenzhen Sun Co",
            "--output",
            "panels.lce.yaml",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("panels.lce.yaml")).unwrap();
    assert!(content.contains("supplier: \"Shenzhen Sun Co\""));
}

#[test]
fn test_new_refuses_to_overwrite() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args(["new", "--title", "Water Pumps", "--sample"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    lce_in(&tmp)
        .args(["new", "--title", "Water Pumps", "--sample", "--force"])
        .assert()
        .success();
}

#[test]
fn test_new_requires_title() {
    let tmp = TempDir::new().unwrap();
    lce_in(&tmp)
        .arg("new")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title is required"));
}

// ============================================================================
// Params Command Tests
// ============================================================================

#[test]
fn test_params_lists_catalog() {
    let tmp = TempDir::new().unwrap();
    lce_in(&tmp)
        .arg("params")
        .assert()
        .success()
        .stdout(predicate::str::contains("fobUsd"))
        .stdout(predicate::str::contains("netProfit"))
        .stdout(predicate::str::contains("fixed 250000"));
}

#[test]
fn test_params_type_filter_tsv() {
    let tmp = TempDir::new().unwrap();
    let output = lce_in(&tmp)
        .args(["params", "--type", "output", "-f", "tsv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|l| l.ends_with("\toutput")));
    assert!(lines[0].starts_with("totalTax\t"));
}

#[test]
fn test_params_json() {
    let tmp = TempDir::new().unwrap();
    let output = lce_in(&tmp)
        .args(["params", "-f", "json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 11);
    assert_eq!(entries[0]["key"], "fobUsd");
    assert_eq!(entries[0]["type"], "input");
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_show_merges_local_file() {
    let tmp = TempDir::new().unwrap();
    write_local_config(tmp.path(), "sample_count: 20\ndefault_y: totalTax\n");

    lce_in(&tmp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sample_count: 20"))
        .stdout(predicate::str::contains("default_y: totalTax"))
        .stdout(predicate::str::contains("author: test-author"));
}

#[test]
fn test_config_invalid_file_reports_path() {
    let tmp = TempDir::new().unwrap();
    write_local_config(tmp.path(), "sample_cuont: 20\n");

    lce_in(&tmp)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_bad_env_value() {
    let tmp = TempDir::new().unwrap();
    lce_in(&tmp)
        .env("LCE_SAMPLES", "many")
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LCE_SAMPLES"));
}

#[test]
fn test_config_path_lists_locations() {
    let tmp = TempDir::new().unwrap();
    write_local_config(tmp.path(), "sample_count: 10\n");

    lce_in(&tmp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".lce/config.yaml"))
        .stdout(predicate::str::contains("lce/config.yaml"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    lce()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lce"));
}
