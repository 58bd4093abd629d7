//! Sampled trajectory points for the plot payload.
//!
//! Closed orbits are sampled uniformly in time over one period by Kepler propagation. Open
//! orbits are swept in true anomaly and clipped at a maximum heliocentric radius.

use impactor_core::units::au_to_km;
use impactor_core::vector::Vector3;
use impactor_orbits::conversion::state_from_conic;
use impactor_orbits::propagation::propagate_state;
use serde::Serialize;

use crate::ImpactError;
use crate::determination::{DeterminedOrbit, Period};

/// Original and post-impact trajectories in heliocentric ecliptic kilometres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryPlot {
    pub units: &'static str,
    pub original: Vec<Vector3>,
    #[serde(rename = "final")]
    pub final_points: Vec<Vector3>,
}

impl TrajectoryPlot {
    pub fn sample(
        before: &DeterminedOrbit,
        after: &DeterminedOrbit,
        mu_km3_s2: f64,
        samples: usize,
        max_radius_au: f64,
    ) -> Result<Self, ImpactError> {
        Ok(Self {
            units: "km",
            original: sample_orbit(before, mu_km3_s2, samples, max_radius_au)?,
            final_points: sample_orbit(after, mu_km3_s2, samples, max_radius_au)?,
        })
    }
}

/// Sample `samples` positions along `orbit`, starting from its current anomaly.
pub fn sample_orbit(
    orbit: &DeterminedOrbit,
    mu_km3_s2: f64,
    samples: usize,
    max_radius_au: f64,
) -> Result<Vec<Vector3>, ImpactError> {
    let samples = samples.max(2);
    match orbit.period {
        Period::Defined { seconds } => (0..samples)
            .map(|k| {
                let dt = seconds * k as f64 / (samples - 1) as f64;
                Ok(propagate_state(&orbit.elements, dt, mu_km3_s2)?.position_km)
            })
            .collect(),
        Period::Undefined => Ok(sample_open_orbit(orbit, mu_km3_s2, samples, max_radius_au)),
    }
}

fn sample_open_orbit(
    orbit: &DeterminedOrbit,
    mu_km3_s2: f64,
    samples: usize,
    max_radius_au: f64,
) -> Vec<Vector3> {
    let el = &orbit.elements;
    let p = orbit.semi_latus_rectum_km;
    let e = el.eccentricity;

    // Keep the point of impact inside the plotted window.
    let nu = el.true_anomaly_rad;
    let current_radius = p / (1.0 + e * nu.cos());
    let r_max = au_to_km(max_radius_au).max(1.5 * current_radius);

    let cos_limit = ((p / r_max - 1.0) / e).clamp(-1.0, 1.0);
    let nu_limit = cos_limit.acos();

    (0..samples)
        .map(|k| {
            let t = k as f64 / (samples - 1) as f64;
            let nu = -nu_limit + 2.0 * nu_limit * t;
            state_from_conic(
                p,
                e,
                el.inclination_rad,
                el.raan_rad,
                el.arg_periapsis_rad,
                nu,
                mu_km3_s2,
            )
            .position_km
        })
        .collect()
}
