//! End-to-end impact calculation.

use impactor_config::EngineConfig;
use impactor_core::units::kms_to_ms;
use impactor_core::vector::{self, Vector3};
use impactor_impulsive::{apply_impulse, momentum_delta_v};
use impactor_orbits::{ConicKind, OrbitalElements, elements_to_state};
use serde::Serialize;
use tracing::{debug, warn};

use crate::ImpactError;
use crate::changes::{OrbitalChanges, compute_orbit_changes};
use crate::determination::{DeterminedOrbit, determine_orbit};
use crate::physical::{estimate_mass, maneuver_cost};
use crate::scenario::{DeltaVSpec, ImpactScenario};
use crate::trajectory::TrajectoryPlot;

/// Output of one impact calculation, shaped for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactResult {
    pub asteroid_name: String,
    #[serde(rename = "diameter")]
    pub diameter_m: f64,
    #[serde(rename = "mass")]
    pub mass_kg: f64,
    /// Applied delta-v vector in m/s.
    #[serde(rename = "delta_v")]
    pub delta_v_m_s: Vector3,
    #[serde(rename = "delta_v_magnitude")]
    pub delta_v_magnitude_m_s: f64,
    /// Delta-v magnitude in km/s.
    #[serde(rename = "maneuver_cost")]
    pub maneuver_cost_km_s: f64,
    pub orbital_changes: OrbitalChanges,
    pub post_impact_conic: ConicKind,
    pub original_elements: OrbitalElements,
    pub final_elements: OrbitalElements,
    pub plot: TrajectoryPlot,
}

impl ImpactResult {
    /// True once the impulse has pushed the asteroid onto an open trajectory.
    pub fn escaped(&self) -> bool {
        self.post_impact_conic != ConicKind::Elliptic
    }
}

/// Run the scenario through impulse application, orbit determination, and aggregation.
///
/// The calculation is a pure function of its inputs; no state survives between calls.
pub fn compute_impact_result(
    scenario: &ImpactScenario,
    config: &EngineConfig,
) -> Result<ImpactResult, ImpactError> {
    config.validate()?;
    let mu = config.mu_sun_km3_s2;

    scenario.elements.validate_elliptical()?;
    let mass_kg = estimate_mass(scenario.diameter_m, scenario.density_kg_m3)?;

    let impact_elements = scenario
        .application_point
        .relocate(&scenario.elements, mu)?;
    let state_before = elements_to_state(&impact_elements, mu)?;

    let delta_v_km_s = match &scenario.delta_v {
        DeltaVSpec::Explicit { delta_v_km_s } => *delta_v_km_s,
        DeltaVSpec::Kinetic {
            impactor,
            direction,
        } => momentum_delta_v(impactor, mass_kg, &state_before, *direction)?,
    };
    debug!(
        asteroid = %scenario.asteroid_name,
        mass_kg,
        ?delta_v_km_s,
        point = ?scenario.application_point,
        "applying impulse"
    );

    let state_after = apply_impulse(&state_before, &delta_v_km_s)?;

    let before = DeterminedOrbit::from_elements(impact_elements, mu);
    let mut after = determine_orbit(&state_after, mu)?;
    after.elements.epoch_jd = impact_elements.epoch_jd;

    if after.conic != ConicKind::Elliptic {
        warn!(
            asteroid = %scenario.asteroid_name,
            eccentricity = after.elements.eccentricity,
            "impulse exceeds escape speed; post-impact period is undefined"
        );
    }

    let orbital_changes = compute_orbit_changes(&before, &after, config.percent_epsilon);
    let plot = TrajectoryPlot::sample(
        &before,
        &after,
        mu,
        config.trajectory_samples,
        config.trajectory_max_radius_au,
    )?;

    let maneuver_cost_km_s = maneuver_cost(&delta_v_km_s);
    Ok(ImpactResult {
        asteroid_name: scenario.asteroid_name.clone(),
        diameter_m: scenario.diameter_m,
        mass_kg,
        delta_v_m_s: vector::scale(&delta_v_km_s, kms_to_ms(1.0)),
        delta_v_magnitude_m_s: kms_to_ms(maneuver_cost_km_s),
        maneuver_cost_km_s,
        orbital_changes,
        post_impact_conic: after.conic,
        original_elements: before.elements,
        final_elements: after.elements,
        plot,
    })
}
