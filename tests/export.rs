use std::io::Write;

use chrono::{TimeZone, Utc};
use kinetic_impactor::engine::{
    ApplicationPoint, DeltaVSpec, EngineConfig, ErrorKind, Failure, ImpactResult, ImpactScenario,
    compute_impact_result,
};
use kinetic_impactor::export::{report, trajectory, writer_for_path};
use kinetic_impactor::orbits::OrbitalElements;
use serde_json::Value;
use tempfile::tempdir;

fn sample_result(samples: usize) -> ImpactResult {
    let scenario = ImpactScenario {
        asteroid_name: "Sample".to_string(),
        diameter_m: 500.0,
        density_kg_m3: 1200.0,
        elements: OrbitalElements::from_degrees(1.2, 0.2, 5.0, 10.0, 20.0, 30.0)
            .with_epoch(2_451_545.0),
        delta_v: DeltaVSpec::Explicit {
            delta_v_km_s: [0.0, 0.0001, 0.0],
        },
        application_point: ApplicationPoint::Epoch,
    };
    let config = EngineConfig {
        trajectory_samples: samples,
        ..EngineConfig::default()
    };
    compute_impact_result(&scenario, &config).unwrap()
}

#[test]
fn julian_dates_render_as_utc_timestamps() {
    assert_eq!(
        report::epoch_utc(2_451_545.0).as_deref(),
        Some("2000-01-01T12:00:00Z")
    );
    assert_eq!(
        report::epoch_utc(2_440_587.5).as_deref(),
        Some("1970-01-01T00:00:00Z")
    );
    assert!(report::epoch_utc(f64::NAN).is_none());
}

#[test]
fn report_wraps_result_in_success_envelope() {
    let result = sample_result(16);
    let generated = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();

    let mut buf = Vec::new();
    report::write_report(&mut buf, &result, generated).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.ends_with('\n'));

    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["generated_utc"], "2026-10-19T08:30:00Z");
    assert_eq!(json["epoch_utc"], "2000-01-01T12:00:00Z");
    assert_eq!(json["asteroid_name"], "Sample");
    assert_eq!(json["diameter"], 500.0);
    assert_eq!(json["orbital_changes"]["semi_major_axis"]["status"], "defined");
    assert_eq!(json["plot"]["original"].as_array().unwrap().len(), 16);
}

#[test]
fn failure_is_written_with_kind_and_message() {
    let failure = Failure {
        kind: ErrorKind::DegenerateOrbit,
        message: "degenerate orbit: zero angular momentum".to_string(),
    };
    let mut buf = Vec::new();
    report::write_failure(&mut buf, &failure).unwrap();

    let json: Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["kind"], "degenerate_orbit");
    assert_eq!(json["error"]["message"], failure.message);
}

#[test]
fn trajectory_csv_lists_both_orbits() {
    let result = sample_result(10);
    let mut buf = Vec::new();
    trajectory::write_plot(&mut buf, &result.plot).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(trajectory::HEADER));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 20);
    assert!(rows[0].starts_with("original,0,"));
    assert!(rows[10].starts_with("final,0,"));
    assert!(rows.iter().all(|row| row.split(',').count() == 5));
}

#[test]
fn writer_for_path_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("out").join("trajectory.csv");
    {
        let mut writer = writer_for_path(&path).unwrap();
        trajectory::write_header(writer.as_mut()).unwrap();
        writer.flush().unwrap();
    }
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.trim_end(), trajectory::HEADER);
}
