use kinetic_impactor::config::Catalog;
use kinetic_impactor::constants::MU_SUN_KM3_S2;
use kinetic_impactor::engine::{
    ApplicationPoint, ChangeEntry, ChangeKey, DeltaVSpec, EngineConfig, ErrorKind, Failure,
    ImpactError, ImpactScenario, ImpulseDirection, KineticImpactor, LookupError, Period,
    compute_changes, compute_impact_result, determine_orbit, estimate_mass, maneuver_cost,
    mean_diameter, scenario_from_lookup,
};
use kinetic_impactor::orbits::{ConicKind, OrbitalElements, elements_to_state};
use kinetic_impactor::vector;

fn circular_scenario(delta_v: DeltaVSpec) -> ImpactScenario {
    ImpactScenario {
        asteroid_name: "Test body".to_string(),
        diameter_m: 340.0,
        density_kg_m3: 2600.0,
        elements: OrbitalElements::from_degrees(1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        delta_v,
        application_point: ApplicationPoint::Periapsis,
    }
}

fn explicit(dv: [f64; 3]) -> DeltaVSpec {
    DeltaVSpec::Explicit { delta_v_km_s: dv }
}

fn catalog() -> Catalog {
    Catalog::load("data/asteroids.yaml").expect("bundled catalog")
}

#[test]
fn radial_kick_on_circular_orbit_raises_it() {
    let result =
        compute_impact_result(&circular_scenario(explicit([0.01, 0.0, 0.0])), &EngineConfig::default())
            .unwrap();

    let sma = result.orbital_changes.semi_major_axis.as_defined().unwrap();
    assert_eq!(sma.original, 1.0);
    assert!(sma.change > 0.0, "Δa = {}", sma.change);
    assert!((sma.change - 1.13e-7).abs() < 1e-8, "Δa = {}", sma.change);

    let ecc = result.orbital_changes.eccentricity.as_defined().unwrap();
    assert!(ecc.final_value > 0.0);
    assert!((ecc.final_value - 3.36e-4).abs() < 1e-5, "e = {}", ecc.final_value);

    let period = result.orbital_changes.period.as_defined().unwrap();
    assert!(period.change > 0.0);
    assert!(period.percent_change.unwrap() > 0.0);

    assert_eq!(result.post_impact_conic, ConicKind::Elliptic);
    assert!(!result.escaped());
    assert!((result.delta_v_m_s[0] - 10.0).abs() < 1e-12);
    assert_eq!(&result.delta_v_m_s[1..], &[0.0, 0.0]);
    assert!((result.maneuver_cost_km_s - 0.01).abs() < 1e-15);
    assert!((result.delta_v_magnitude_m_s - 10.0).abs() < 1e-12);
}

#[test]
fn zero_original_value_has_no_percent_change() {
    let result =
        compute_impact_result(&circular_scenario(explicit([0.01, 0.0, 0.0])), &EngineConfig::default())
            .unwrap();
    let ecc = result.orbital_changes.eccentricity.as_defined().unwrap();
    assert_eq!(ecc.original, 0.0);
    assert!(ecc.percent_change.is_none());

    let json = serde_json::to_value(&result).unwrap();
    let entry = &json["orbital_changes"]["eccentricity"];
    assert_eq!(entry["status"], "defined");
    assert!(entry["percent_change"].is_null());
    assert!(entry["change"].as_f64().unwrap() > 0.0);
}

#[test]
fn mass_of_a_340_m_rocky_body() {
    let mass = estimate_mass(340.0, 2600.0).unwrap();
    assert!((mass - 5.3507e10).abs() / 5.3507e10 < 1e-3, "mass = {mass}");

    assert!(matches!(estimate_mass(0.0, 2600.0), Err(ImpactError::InvalidInput(_))));
    assert!(matches!(estimate_mass(-5.0, 2600.0), Err(ImpactError::InvalidInput(_))));
    assert!(matches!(estimate_mass(340.0, 0.0), Err(ImpactError::InvalidInput(_))));
    assert!(matches!(estimate_mass(f64::NAN, 2600.0), Err(ImpactError::InvalidInput(_))));
}

#[test]
fn diameter_range_midpoint_and_maneuver_cost() {
    assert_eq!(mean_diameter(310.0, 370.0).unwrap(), 340.0);
    assert_eq!(mean_diameter(100.0, 100.0).unwrap(), 100.0);
    assert!(mean_diameter(400.0, 300.0).is_err());
    assert!(mean_diameter(0.0, 300.0).is_err());

    assert!((maneuver_cost(&[0.003, 0.004, 0.0]) - 0.005).abs() < 1e-15);
    assert_eq!(maneuver_cost(&[0.0, 0.0, 0.0]), 0.0);
}

#[test]
fn invalid_scenario_inputs_fail_as_invalid_input() {
    let mut scenario = circular_scenario(explicit([0.0, 0.0, 0.0]));
    scenario.diameter_m = 0.0;
    let err = compute_impact_result(&scenario, &EngineConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let mut scenario = circular_scenario(explicit([f64::NAN, 0.0, 0.0]));
    scenario.diameter_m = 340.0;
    let err = compute_impact_result(&scenario, &EngineConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let mut scenario = circular_scenario(explicit([0.0, 0.0, 0.0]));
    scenario.elements.eccentricity = 1.3;
    let err = compute_impact_result(&scenario, &EngineConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let config = EngineConfig {
        trajectory_samples: 1,
        ..EngineConfig::default()
    };
    let err = compute_impact_result(&circular_scenario(explicit([0.0; 3])), &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn escape_impulse_leaves_period_undefined() {
    let result =
        compute_impact_result(&circular_scenario(explicit([0.0, 15.0, 0.0])), &EngineConfig::default())
            .unwrap();

    assert_eq!(result.post_impact_conic, ConicKind::Hyperbolic);
    assert!(result.escaped());
    assert!(result.orbital_changes.period.is_undefined());
    assert!((result.orbital_changes.period.original() - 365.2569).abs() < 0.01);

    let sma = result.orbital_changes.semi_major_axis.as_defined().unwrap();
    assert!(sma.final_value < 0.0);
    assert!(result.orbital_changes.eccentricity.as_defined().unwrap().final_value > 1.0);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["orbital_changes"]["period"]["status"], "undefined");
    assert!(json["orbital_changes"]["period"].get("final").is_none());

    let final_points = &result.plot.final_points;
    assert_eq!(final_points.len(), 100);
    assert!(final_points.iter().all(vector::is_finite));
}

#[test]
fn zero_impulse_leaves_orbit_unchanged() {
    let record_scenario = scenario_from_lookup(
        &catalog(),
        "Bennu",
        None,
        2600.0,
        explicit([0.0, 0.0, 0.0]),
        ApplicationPoint::Epoch,
    )
    .unwrap();
    let result = compute_impact_result(&record_scenario, &EngineConfig::default()).unwrap();

    for (key, entry) in result.orbital_changes.iter() {
        let change = entry.as_defined().unwrap();
        let tolerance = match key {
            ChangeKey::Period => 1e-7,
            _ => 1e-9,
        };
        assert!(
            change.change.abs() < tolerance,
            "{} changed by {}",
            key.as_str(),
            change.change
        );
    }
    assert_eq!(result.delta_v_magnitude_m_s, 0.0);
    assert_eq!(result.final_elements.epoch_jd, Some(2455562.5));
}

#[test]
fn kinetic_impactor_direction_controls_sign_of_change() {
    let impactor = KineticImpactor {
        mass_kg: 1.0e6,
        velocity_m_s: 10_000.0,
        beta: 1.0,
    };
    let run = |direction| {
        let scenario = scenario_from_lookup(
            &catalog(),
            "apophis",
            None,
            2600.0,
            DeltaVSpec::Kinetic {
                impactor,
                direction,
            },
            ApplicationPoint::Periapsis,
        )
        .unwrap();
        compute_impact_result(&scenario, &EngineConfig::default()).unwrap()
    };

    let along = run(ImpulseDirection::Along);
    let against = run(ImpulseDirection::Against);

    // 1e10 kg·m/s spread over ~5.35e10 kg.
    assert!((along.delta_v_magnitude_m_s - 0.1869).abs() < 1e-3);
    assert!(along.orbital_changes.semi_major_axis.as_defined().unwrap().change > 0.0);
    assert!(against.orbital_changes.semi_major_axis.as_defined().unwrap().change < 0.0);
    assert!(along.orbital_changes.period.as_defined().unwrap().change > 0.0);
    assert!(against.orbital_changes.period.as_defined().unwrap().change < 0.0);
}

#[test]
fn lookup_failure_propagates_unchanged() {
    let err = scenario_from_lookup(
        &catalog(),
        "Nonexistent",
        None,
        2600.0,
        explicit([0.0; 3]),
        ApplicationPoint::Epoch,
    )
    .unwrap_err();

    assert!(matches!(err, ImpactError::Lookup(LookupError::NotFound(ref id)) if id == "Nonexistent"));
    let failure = Failure::from(&err);
    assert_eq!(failure.kind, ErrorKind::Lookup);
    let json = serde_json::to_value(&failure).unwrap();
    assert_eq!(json["kind"], "lookup");
}

#[test]
fn cancelling_velocity_is_a_degenerate_orbit() {
    let scenario = circular_scenario(explicit([0.0; 3]));
    let state = elements_to_state(&scenario.elements, MU_SUN_KM3_S2).unwrap();
    let stop = vector::scale(&state.velocity_km_s, -1.0);

    let err = compute_impact_result(
        &ImpactScenario {
            delta_v: explicit(stop),
            ..scenario
        },
        &EngineConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateOrbit);
}

#[test]
fn catalog_density_and_diameter_feed_the_scenario() {
    let scenario = scenario_from_lookup(
        &catalog(),
        "2099942",
        None,
        1000.0,
        explicit([0.0; 3]),
        ApplicationPoint::Epoch,
    )
    .unwrap();
    assert_eq!(scenario.diameter_m, 340.0);
    assert_eq!(scenario.density_kg_m3, 2600.0);
    assert_eq!(scenario.elements.epoch_jd, Some(2460600.5));

    let overridden = scenario_from_lookup(
        &catalog(),
        "2099942",
        Some(3000.0),
        1000.0,
        explicit([0.0; 3]),
        ApplicationPoint::Apoapsis,
    )
    .unwrap();
    assert_eq!(overridden.density_kg_m3, 3000.0);

    let result = compute_impact_result(&overridden, &EngineConfig::default()).unwrap();
    assert!((result.original_elements.true_anomaly_rad - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn determine_orbit_reports_period_only_for_closed_orbits() {
    let elements = OrbitalElements::from_degrees(1.64, 0.383, 3.41, 72.99, 319.58, 75.0);
    let state = elements_to_state(&elements, MU_SUN_KM3_S2).unwrap();
    let orbit = determine_orbit(&state, MU_SUN_KM3_S2).unwrap();
    let expected = elements.period_seconds(MU_SUN_KM3_S2).unwrap();
    match orbit.period {
        Period::Defined { seconds } => assert!((seconds - expected).abs() / expected < 1e-9),
        Period::Undefined => panic!("closed orbit must have a period"),
    }
    let p = elements.semi_latus_rectum_km();
    assert!((orbit.semi_latus_rectum_km - p).abs() / p < 1e-9);
}

#[test]
fn compute_changes_compares_element_sets() {
    let before = OrbitalElements::from_degrees(1.0, 0.1, 2.0, 0.0, 0.0, 0.0);
    let after = OrbitalElements::from_degrees(1.1, 0.1, 2.0, 0.0, 0.0, 0.0);
    let changes = compute_changes(&before, &after, MU_SUN_KM3_S2, 1e-12);

    let sma = changes.semi_major_axis.as_defined().unwrap();
    assert!((sma.change - 0.1).abs() < 1e-12);
    assert!((sma.percent_change.unwrap() - 10.0).abs() < 1e-9);

    let inc = changes.inclination.as_defined().unwrap();
    assert_eq!(inc.change, 0.0);
    assert_eq!(inc.percent_change, Some(0.0));

    // T ∝ a^1.5
    let period = changes.period.as_defined().unwrap();
    assert!((period.final_value / period.original - 1.1f64.powf(1.5)).abs() < 1e-12);
    assert!(matches!(changes.get(ChangeKey::Eccentricity), ChangeEntry::Defined(_)));
}

#[test]
fn result_serializes_with_expected_shape() {
    let result =
        compute_impact_result(&circular_scenario(explicit([0.0, 0.001, 0.0])), &EngineConfig::default())
            .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    for key in [
        "asteroid_name",
        "diameter",
        "mass",
        "delta_v",
        "delta_v_magnitude",
        "maneuver_cost",
        "orbital_changes",
        "plot",
    ] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(json["delta_v"].as_array().unwrap().len(), 3);
    for key in ["semi_major_axis", "eccentricity", "inclination", "period"] {
        let entry = &json["orbital_changes"][key];
        for field in ["original", "final", "change", "percent_change"] {
            assert!(entry.get(field).is_some(), "{key} missing {field}");
        }
    }
    assert_eq!(json["plot"]["units"], "km");
    assert_eq!(json["plot"]["original"].as_array().unwrap().len(), 100);
    assert_eq!(json["plot"]["final"].as_array().unwrap().len(), 100);

    let first = result.plot.original.first().unwrap();
    let last = result.plot.original.last().unwrap();
    assert!(vector::norm(&vector::sub(first, last)) < 1.0);
}

#[test]
fn application_point_advances_epoch_with_the_anomaly() {
    let scenario = scenario_from_lookup(
        &catalog(),
        "Apophis",
        None,
        2600.0,
        explicit([0.0; 3]),
        ApplicationPoint::Epoch,
    )
    .unwrap();
    let catalog_epoch = scenario.elements.epoch_jd.unwrap();
    let period_days = scenario.elements.period_seconds(MU_SUN_KM3_S2).unwrap() / 86_400.0;

    let at_periapsis = ApplicationPoint::Periapsis
        .relocate(&scenario.elements, MU_SUN_KM3_S2)
        .unwrap();
    let at_apoapsis = ApplicationPoint::Apoapsis
        .relocate(&scenario.elements, MU_SUN_KM3_S2)
        .unwrap();
    let periapsis_epoch = at_periapsis.epoch_jd.unwrap();
    let apoapsis_epoch = at_apoapsis.epoch_jd.unwrap();

    assert_eq!(at_periapsis.true_anomaly_rad, 0.0);
    assert!(periapsis_epoch > catalog_epoch && periapsis_epoch < catalog_epoch + period_days);
    assert!(apoapsis_epoch > catalog_epoch && apoapsis_epoch < catalog_epoch + period_days);
    // Catalog mean anomaly is ~300°, so periapsis comes first and apoapsis half a period later.
    assert!((apoapsis_epoch - periapsis_epoch - 0.5 * period_days).abs() < 1e-6);

    // The relocated state is where Kepler propagation puts the asteroid at that time.
    let dt = (periapsis_epoch - catalog_epoch) * 86_400.0;
    let propagated = kinetic_impactor::orbits::propagation::propagate_state(
        &scenario.elements,
        dt,
        MU_SUN_KM3_S2,
    )
    .unwrap();
    let relocated = elements_to_state(&at_periapsis, MU_SUN_KM3_S2).unwrap();
    assert!(vector::norm(&vector::sub(&propagated.position_km, &relocated.position_km)) < 10.0);

    let unchanged = ApplicationPoint::Epoch
        .relocate(&scenario.elements, MU_SUN_KM3_S2)
        .unwrap();
    assert_eq!(unchanged, scenario.elements);

    let mut at_apoapsis_scenario = scenario.clone();
    at_apoapsis_scenario.application_point = ApplicationPoint::Apoapsis;
    let result = compute_impact_result(&at_apoapsis_scenario, &EngineConfig::default()).unwrap();
    assert_eq!(result.original_elements.epoch_jd, Some(apoapsis_epoch));
    assert_eq!(result.final_elements.epoch_jd, Some(apoapsis_epoch));
}
