//! Landed cost calculation tests through the `lce calc` command

mod common;

use common::{lce_in, replace_line, setup_sample_shipment};
use predicates::prelude::*;
use tempfile::TempDir;

fn tsv_value(stdout: &str, key: &str) -> String {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix(&format!("{}\t", key)))
        .unwrap_or_else(|| panic!("missing {} in output:\n{}", key, stdout))
        .to_string()
}

#[test]
fn test_calc_reference_shipment() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Water Pumps"))
        .stdout(predicate::str::contains("$17,650.00"))
        .stdout(predicate::str::contains("ETB 3,145,371.21"))
        .stdout(predicate::str::contains("ETB 31,453.71"))
        .stdout(predicate::str::contains("1.73x"));
}

#[test]
fn test_calc_shows_tax_cascade_bases() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Customs duty"))
        // VAT is levied on CIF + duty + excise + sur-tax
        .stdout(predicate::str::contains("2,594,814.75"))
        .stdout(predicate::str::contains("389,222.21"));
}

#[test]
fn test_calc_tsv_output() {
    let (tmp, _path) = setup_sample_shipment();
    let output = lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml", "-f", "tsv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(tsv_value(&stdout, "cif_etb"), "2144475.00");
    assert_eq!(tsv_value(&stdout, "duty"), "214447.50");
    assert_eq!(tsv_value(&stdout, "sur_tax"), "235892.25");
    assert_eq!(tsv_value(&stdout, "withholding"), "64334.25");
    assert_eq!(tsv_value(&stdout, "total_logistics"), "97000.00");
    assert_eq!(tsv_value(&stdout, "total_landed_cost"), "3145371.21");
}

#[test]
fn test_calc_json_output() {
    let (tmp, _path) = setup_sample_shipment();
    let output = lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let total = value["breakdown"]["total_tax"].as_f64().unwrap();
    assert!((total - 903_896.2125).abs() < 1e-6);
    assert_eq!(value["tax_stages"].as_array().unwrap().len(), 5);
    assert!(value["id"].as_str().unwrap().starts_with("SHP-"));
}

#[test]
fn test_calc_default_format_from_config() {
    let (tmp, _path) = setup_sample_shipment();
    common::write_local_config(tmp.path(), "default_format: yaml\n");

    lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("breakdown:"))
        .stdout(predicate::str::contains("cif_usd: 17650"));
}

#[test]
fn test_calc_set_override() {
    let (tmp, path) = setup_sample_shipment();
    let before = std::fs::read_to_string(&path).unwrap();

    let output = lce_in(&tmp)
        .args([
            "calc",
            "water-pumps.lce.yaml",
            "--set",
            "dutyRate=0",
            "--set",
            "sur_tax_rate=0",
            "-f",
            "tsv",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(tsv_value(&stdout, "duty"), "0.00");
    assert_eq!(tsv_value(&stdout, "sur_tax"), "0.00");

    // File untouched
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_calc_rejects_bad_override() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml", "--set", "tariff=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown cost field"));

    lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml", "--set", "vat_rate=high"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --set 'vat_rate=high'"));
}

#[test]
fn test_calc_zero_fob_factor_is_na() {
    let (tmp, path) = setup_sample_shipment();
    replace_line(&path, "fob_usd", "0");

    lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"));
}

#[test]
fn test_calc_zero_quantity_counts_as_one_unit() {
    let (tmp, path) = setup_sample_shipment();
    replace_line(&path, "quantity", "0");

    let output = lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml", "-f", "tsv"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        tsv_value(&stdout, "cost_per_unit"),
        tsv_value(&stdout, "total_landed_cost")
    );
}

#[test]
fn test_calc_bar() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args(["calc", "water-pumps.lce.yaml", "--bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("█ CIF"))
        .stdout(predicate::str::contains("Logistics"));
}

#[test]
fn test_calc_missing_file() {
    let tmp = TempDir::new().unwrap();
    lce_in(&tmp)
        .args(["calc", "nope.lce.yaml"])
        .assert()
        .failure();
}

#[test]
fn test_calc_yaml_syntax_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("broken.lce.yaml"), "title: [unclosed\n").unwrap();

    lce_in(&tmp)
        .args(["calc", "broken.lce.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.lce.yaml"));
}
