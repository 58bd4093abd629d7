use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

fn impact() -> Command {
    let mut cmd = Command::cargo_bin("impact").expect("impact bin");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn impact_reports_apophis_deflection_as_json() {
    let cache = tempfile::tempdir().expect("tempdir");
    let output = impact()
        .args(["--asteroid", "Apophis", "--neo-cache"])
        .arg(cache.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("json report");
    assert_eq!(json["success"], true);
    assert_eq!(json["asteroid_name"], "99942 Apophis (2004 MN4)");
    assert_eq!(json["diameter"], 340.0);
    assert_eq!(json["epoch_utc"], "2024-10-17T00:00:00Z");
    let sma = &json["orbital_changes"]["semi_major_axis"];
    assert_eq!(sma["status"], "defined");
    assert!(sma["change"].as_f64().unwrap() > 0.0);
}

#[test]
fn impact_accepts_explicit_negative_delta_v() {
    let cache = tempfile::tempdir().expect("tempdir");
    let output = impact()
        .args(["--asteroid", "Bennu", "--delta-v", "-0.001,0,0", "--at", "apoapsis"])
        .arg("--neo-cache")
        .arg(cache.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("json report");
    assert!((json["delta_v"][0].as_f64().unwrap() + 1.0).abs() < 1e-12);
    assert!((json["maneuver_cost"].as_f64().unwrap() - 0.001).abs() < 1e-15);
}

#[test]
fn impact_rejects_malformed_delta_v() {
    impact()
        .args(["--asteroid", "Bennu", "--delta-v", "0.001,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("three"));
}

#[test]
fn unknown_asteroid_fails_with_lookup_error() {
    let cache = tempfile::tempdir().expect("tempdir");
    let assert = impact()
        .args(["--asteroid", "2000433", "--neo-cache"])
        .arg(cache.path())
        .assert()
        .failure();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json failure");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["kind"], "lookup");
}

#[test]
fn escape_impact_marks_period_undefined() {
    let cache = tempfile::tempdir().expect("tempdir");
    let output = impact()
        .args([
            "--asteroid",
            "Apophis",
            "--craft-mass",
            "1e11",
            "--craft-velocity",
            "10000",
            "--beta",
            "1",
            "--at",
            "periapsis",
        ])
        .arg("--neo-cache")
        .arg(cache.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("json report");
    assert_eq!(json["post_impact_conic"], "hyperbolic");
    assert_eq!(json["orbital_changes"]["period"]["status"], "undefined");
}

#[test]
fn impact_writes_report_and_trajectory_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report_path = dir.path().join("out").join("didymos.json");
    let csv_path = dir.path().join("out").join("didymos.csv");

    impact()
        .args(["--asteroid", "Didymos", "--direction", "against"])
        .arg("--neo-cache")
        .arg(dir.path().join("neo"))
        .arg("--output")
        .arg(&report_path)
        .arg("--trajectory")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Impact Summary"));

    let report: Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("report")).expect("json");
    assert_eq!(report["success"], true);
    let sma = &report["orbital_changes"]["semi_major_axis"];
    assert!(sma["change"].as_f64().unwrap() < 0.0);

    let csv = fs::read_to_string(&csv_path).expect("trajectory csv");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("orbit,index,x_km,y_km,z_km"));
    assert_eq!(lines.count(), 200);
}

#[test]
fn impact_resolves_records_from_neo_cache() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("2101955.json"),
        include_str!("fixtures/neo_2101955.json"),
    )
    .expect("seed cache");
    let empty_catalog = dir.path().join("none.yaml");

    let output = impact()
        .args(["--asteroid", "2101955", "--delta-v", "0,0.0001,0"])
        .arg("--catalog")
        .arg(&empty_catalog)
        .arg("--neo-cache")
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("json report");
    assert_eq!(json["asteroid_name"], "101955 Bennu (1999 RQ36)");
    // Mean of the 290.2944–649.1182 m range.
    assert!((json["diameter"].as_f64().unwrap() - 469.7063).abs() < 1e-9);
    assert_eq!(json["epoch_utc"], "2025-11-21T00:00:00Z");
}

#[test]
fn orbit_plot_rejects_csv_without_coordinates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("bad.csv");
    fs::write(&csv_path, "orbit,index,x_km\noriginal,0,1.0\n").expect("csv");

    Command::cargo_bin("orbit_plot")
        .expect("orbit_plot bin")
        .arg("--input")
        .arg(&csv_path)
        .arg("--output")
        .arg(dir.path().join("orbits.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("y_km"));
}
