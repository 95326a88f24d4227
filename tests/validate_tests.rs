//! Schema validation tests through `lce validate`

mod common;

use common::{lce_in, replace_line, setup_sample_shipment};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_validate_sample_passes() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files checked:  1"))
        .stdout(predicate::str::contains("All files passed validation"));
}

#[test]
fn test_validate_reports_type_error_with_location() {
    let (tmp, path) = setup_sample_shipment();
    replace_line(&path, "vat_rate", "fifteen");

    lce_in(&tmp)
        .args(["validate", "water-pumps.lce.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 error(s)"))
        .stdout(predicate::str::contains("/inputs/vat_rate"));
}

#[test]
fn test_validate_rejects_unknown_fields() {
    let (tmp, path) = setup_sample_shipment();
    let content = fs::read_to_string(&path).unwrap();
    fs::write(&path, content.replace("inputs:\n", "inputs:\n  tariff_band: 3\n")).unwrap();

    lce_in(&tmp)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed: 1 file has errors"));
}

#[test]
fn test_validate_bad_id() {
    let (tmp, path) = setup_sample_shipment();
    replace_line(&path, "id", "REQ-123");

    lce_in(&tmp)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("/id"));
}

#[test]
fn test_validate_syntax_error() {
    let (tmp, _path) = setup_sample_shipment();
    fs::write(tmp.path().join("broken.lce.yaml"), "id: [\n").unwrap();

    lce_in(&tmp)
        .args(["validate", "broken.lce.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("broken.lce.yaml"));
}

#[test]
fn test_validate_warnings_pass_unless_strict() {
    let (tmp, path) = setup_sample_shipment();
    replace_line(&path, "quantity", "0");

    lce_in(&tmp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("zero quantity"))
        .stdout(predicate::str::contains("Total warnings: 1"));

    lce_in(&tmp)
        .args(["validate", "--strict"])
        .assert()
        .failure();
}

#[test]
fn test_validate_negative_value_warns() {
    let (tmp, path) = setup_sample_shipment();
    replace_line(&path, "misc_cost_etb", "-500");

    lce_in(&tmp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("misc_cost_etb: negative value"));
}

#[test]
fn test_validate_stops_at_first_error_unless_keep_going() {
    let (tmp, _path) = setup_sample_shipment();
    fs::write(tmp.path().join("a-broken.lce.yaml"), "id: [\n").unwrap();
    fs::write(tmp.path().join("b-broken.lce.yaml"), "id: [\n").unwrap();

    lce_in(&tmp)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Files checked:  1"));

    lce_in(&tmp)
        .args(["validate", "--keep-going"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Files checked:  3"))
        .stderr(predicate::str::contains("2 files have errors"));
}

#[test]
fn test_validate_summary_hides_details() {
    let (tmp, path) = setup_sample_shipment();
    replace_line(&path, "vat_rate", "fifteen");

    lce_in(&tmp)
        .args(["validate", "--summary"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("/inputs/vat_rate").not())
        .stdout(predicate::str::contains("Validation Summary"));
}

#[test]
fn test_validate_walks_subdirectories_and_skips_hidden() {
    let (tmp, path) = setup_sample_shipment();
    let nested = tmp.path().join("2024/q3");
    fs::create_dir_all(&nested).unwrap();
    fs::copy(&path, nested.join("copy.lce.yaml")).unwrap();

    let hidden = tmp.path().join(".archive");
    fs::create_dir_all(&hidden).unwrap();
    fs::write(hidden.join("old.lce.yaml"), "id: [\n").unwrap();
    fs::write(tmp.path().join("notes.yaml"), "id: [\n").unwrap();

    lce_in(&tmp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files checked:  2"));
}
