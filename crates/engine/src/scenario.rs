//! Impact scenario inputs and their construction from catalog records.

use std::f64::consts::PI;

use impactor_config::{AsteroidConfig, AsteroidLookup};
use impactor_core::angles::wrap_two_pi;
use impactor_core::vector::Vector3;
use impactor_impulsive::{ImpulseDirection, KineticImpactor};
use impactor_orbits::propagation::propagate;
use impactor_orbits::{OrbitError, OrbitalElements, anomaly};
use serde::{Deserialize, Serialize};

use crate::ImpactError;
use crate::physical::mean_diameter;

/// How the delta-v is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DeltaVSpec {
    /// A delta-v vector given directly in the inertial frame (km/s).
    Explicit { delta_v_km_s: Vector3 },
    /// Momentum transferred by a spacecraft hitting the asteroid.
    Kinetic {
        impactor: KineticImpactor,
        direction: ImpulseDirection,
    },
}

/// Where on the orbit the impulse is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationPoint {
    /// At the true anomaly carried by the scenario elements.
    #[default]
    Epoch,
    Periapsis,
    Apoapsis,
}

impl ApplicationPoint {
    /// Elements propagated forward to the next passage through the application point.
    ///
    /// The epoch advances by the time of flight, at most one orbital period.
    pub fn relocate(
        &self,
        elements: &OrbitalElements,
        mu_km3_s2: f64,
    ) -> Result<OrbitalElements, OrbitError> {
        let target = match self {
            ApplicationPoint::Epoch => return Ok(*elements),
            ApplicationPoint::Periapsis => 0.0,
            ApplicationPoint::Apoapsis => PI,
        };
        let mean_motion = elements.mean_motion(mu_km3_s2).ok_or_else(|| {
            OrbitError::InvalidInput(format!(
                "semi-major axis {} km has no mean motion",
                elements.semi_major_axis_km
            ))
        })?;
        let m_now = anomaly::mean_from_true(elements.true_anomaly_rad, elements.eccentricity)?;
        let m_target = anomaly::mean_from_true(target, elements.eccentricity)?;
        let time_of_flight_s = wrap_two_pi(m_target - m_now) / mean_motion;

        Ok(propagate(elements, time_of_flight_s, mu_km3_s2)?.with_true_anomaly(target))
    }
}

/// Immutable input bundle for one impact calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactScenario {
    pub asteroid_name: String,
    pub diameter_m: f64,
    pub density_kg_m3: f64,
    /// Pre-impact heliocentric elements (must describe a bound orbit).
    pub elements: OrbitalElements,
    pub delta_v: DeltaVSpec,
    #[serde(default)]
    pub application_point: ApplicationPoint,
}

impl ImpactScenario {
    /// Build a scenario from a catalog record; `density_kg_m3` falls back to the record's value.
    pub fn from_record(
        record: &AsteroidConfig,
        density_kg_m3: Option<f64>,
        default_density_kg_m3: f64,
        delta_v: DeltaVSpec,
        application_point: ApplicationPoint,
    ) -> Result<Self, ImpactError> {
        let diameter_m = mean_diameter(record.diameter_min_m, record.diameter_max_m)?;
        let orbit = &record.orbit;
        let true_anomaly_rad =
            anomaly::true_from_mean(orbit.mean_anomaly_deg.to_radians(), orbit.eccentricity)?;
        let elements = OrbitalElements::from_degrees(
            orbit.semi_major_axis_au,
            orbit.eccentricity,
            orbit.inclination_deg,
            orbit.ascending_node_deg,
            orbit.perihelion_argument_deg,
            0.0,
        )
        .with_true_anomaly(true_anomaly_rad)
        .with_epoch(orbit.epoch_jd);
        elements.validate_elliptical()?;

        Ok(Self {
            asteroid_name: record.name.clone(),
            diameter_m,
            density_kg_m3: density_kg_m3
                .or(record.density_kg_m3)
                .unwrap_or(default_density_kg_m3),
            elements,
            delta_v,
            application_point,
        })
    }
}

/// Resolve `id` through `lookup` and build a scenario from the returned record.
pub fn scenario_from_lookup(
    lookup: &dyn AsteroidLookup,
    id: &str,
    density_kg_m3: Option<f64>,
    default_density_kg_m3: f64,
    delta_v: DeltaVSpec,
    application_point: ApplicationPoint,
) -> Result<ImpactScenario, ImpactError> {
    let record = lookup.lookup(id)?;
    tracing::debug!(id, name = %record.name, "resolved asteroid record");
    ImpactScenario::from_record(
        &record,
        density_kg_m3,
        default_density_kg_m3,
        delta_v,
        application_point,
    )
}
