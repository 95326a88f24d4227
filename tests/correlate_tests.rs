//! Scenario, regression and recommendation tests through `lce correlate`

mod common;

use common::{lce_in, setup_sample_shipment, write_local_config};
use predicates::prelude::*;

fn report_json(args: &[&str]) -> serde_json::Value {
    let (tmp, _path) = setup_sample_shipment();
    let output = lce_in(&tmp)
        .args(["correlate", "water-pumps.lce.yaml", "-f", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_fob_vs_landed_cost_is_strong_positive() {
    let report = report_json(&["--x", "fobUsd", "--y", "totalLandedCost"]);

    let r = report["stats"]["r"].as_f64().unwrap();
    assert!(r > 0.99, "r = {}", r);
    assert_eq!(report["strength"], "Strong");
    assert_eq!(report["direction"], "Positive");
    assert_eq!(report["rule_source"], "pair_rule");
    assert_eq!(
        report["recommendations"][0]["title"],
        "Supplier price is the main lever"
    );
    assert_eq!(report["points"].as_array().unwrap().len(), 50);
}

#[test]
fn test_hr_cost_vs_net_profit_is_negative() {
    let report = report_json(&["--x", "hrCost", "--y", "netProfit"]);

    let r = report["stats"]["r"].as_f64().unwrap();
    assert!(r < -0.5, "r = {}", r);
    assert_eq!(report["direction"], "Negative");
    assert_eq!(report["profile"]["slope_sign"], -1.0);
    assert_eq!(
        report["recommendations"][0]["title"],
        "Staff costs squeeze margin"
    );
}

#[test]
fn test_unrelated_pair_falls_to_weak_tier() {
    let report = report_json(&["--x", "hrCost", "--y", "totalLandedCost"]);

    assert_eq!(report["profile"]["relevance"], 0.1);
    let r = report["stats"]["r"].as_f64().unwrap();
    assert!(r.abs() < 0.3, "r = {}", r);
    assert_eq!(report["rule_source"], "weak_tier");
    assert_eq!(report["recommendations"][0]["title"], "Little influence");
}

#[test]
fn test_points_are_sorted_and_non_negative() {
    let report = report_json(&["--x", "exchangeRate", "--y", "revenue"]);
    let points = report["points"].as_array().unwrap();

    let xs: Vec<f64> = points.iter().map(|p| p["x"].as_f64().unwrap()).collect();
    assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    assert!(points.iter().all(|p| p["y"].as_f64().unwrap() >= 0.0));

    // Revenue has no calculation path and sits around the fallback base
    let mean_y: f64 = points.iter().map(|p| p["y"].as_f64().unwrap()).sum::<f64>() / points.len() as f64;
    assert!((mean_y - 100.0).abs() < 20.0);
}

#[test]
fn test_correlate_is_deterministic() {
    let a = report_json(&["--x", "freightUsd", "--y", "totalLandedCost"]);
    let b = report_json(&["--x", "freightUsd", "--y", "totalLandedCost"]);
    assert_eq!(a["points"], b["points"]);
    assert_eq!(a["stats"], b["stats"]);
}

#[test]
fn test_samples_flag() {
    let report = report_json(&["--x", "dutyRate", "--y", "totalTax", "--samples", "12"]);
    assert_eq!(report["points"].as_array().unwrap().len(), 12);
}

#[test]
fn test_snake_case_keys_accepted() {
    let report = report_json(&["--x", "exchange_rate", "--y", "cost_per_unit"]);
    assert_eq!(report["x"], "exchangeRate");
    assert_eq!(report["y"], "costPerUnit");
}

#[test]
fn test_correlate_text_report() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args([
            "correlate",
            "water-pumps.lce.yaml",
            "--x",
            "fobUsd",
            "--y",
            "totalLandedCost",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correlation (r)"))
        .stdout(predicate::str::contains("Strong"))
        .stdout(predicate::str::contains("Recommendations"))
        .stdout(predicate::str::contains("x: "));
}

#[test]
fn test_correlate_no_plot() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args(["correlate", "water-pumps.lce.yaml", "--no-plot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommendations"))
        .stdout(predicate::str::contains("x: ").not());
}

#[test]
fn test_correlate_csv() {
    let (tmp, _path) = setup_sample_shipment();
    let output = lce_in(&tmp)
        .args([
            "correlate",
            "water-pumps.lce.yaml",
            "--x",
            "dutyRate",
            "--y",
            "totalTax",
            "--samples",
            "5",
            "--csv",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "dutyRate,totalTax,z");
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_axes_default_from_config() {
    let (tmp, _path) = setup_sample_shipment();
    write_local_config(tmp.path(), "default_x: dutyRate\ndefault_y: totalTax\nsample_count: 8\n");

    let output = lce_in(&tmp)
        .args(["correlate", "water-pumps.lce.yaml", "-f", "json"])
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["x"], "dutyRate");
    assert_eq!(report["y"], "totalTax");
    assert_eq!(report["points"].as_array().unwrap().len(), 8);
}

#[test]
fn test_wrong_axis_types_rejected() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args(["correlate", "water-pumps.lce.yaml", "--x", "totalTax", "--y", "netProfit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("X axis must be an input"));

    lce_in(&tmp)
        .args(["correlate", "water-pumps.lce.yaml", "--x", "fobUsd", "--y", "dutyRate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Y axis must be an output"));
}

#[test]
fn test_unknown_key_rejected() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args(["correlate", "water-pumps.lce.yaml", "--x", "profitMargin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown parameter"));
}

#[test]
fn test_zero_samples_rejected() {
    let (tmp, _path) = setup_sample_shipment();

    lce_in(&tmp)
        .args(["correlate", "water-pumps.lce.yaml", "--samples", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}
