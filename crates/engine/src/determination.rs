//! Orbit determination from a Cartesian state.

use impactor_core::vector;
use impactor_orbits::{ConicKind, OrbitalElements, StateVector, state_to_elements};
use serde::Serialize;

use crate::ImpactError;

/// Orbital period, explicitly undefined once the orbit no longer closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Period {
    Defined { seconds: f64 },
    Undefined,
}

impl Period {
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Period::Defined { seconds } => Some(*seconds),
            Period::Undefined => None,
        }
    }
}

/// Elements plus the quantities derived alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeterminedOrbit {
    pub elements: OrbitalElements,
    pub period: Period,
    pub conic: ConicKind,
    /// `p = h²/μ`; finite even when the semi-major axis is not.
    pub semi_latus_rectum_km: f64,
}

impl DeterminedOrbit {
    /// Wrap elements that were given rather than determined.
    pub fn from_elements(elements: OrbitalElements, mu_km3_s2: f64) -> Self {
        Self {
            period: period_of(&elements, mu_km3_s2),
            conic: elements.conic(),
            semi_latus_rectum_km: elements.semi_latus_rectum_km(),
            elements,
        }
    }
}

/// Recover elements and period from `state`.
pub fn determine_orbit(state: &StateVector, mu_km3_s2: f64) -> Result<DeterminedOrbit, ImpactError> {
    let elements = state_to_elements(state, mu_km3_s2)?;
    let h = vector::norm(&state.angular_momentum());
    Ok(DeterminedOrbit {
        period: period_of(&elements, mu_km3_s2),
        conic: elements.conic(),
        semi_latus_rectum_km: h * h / mu_km3_s2,
        elements,
    })
}

fn period_of(elements: &OrbitalElements, mu_km3_s2: f64) -> Period {
    match elements.period_seconds(mu_km3_s2) {
        Some(seconds) if seconds.is_finite() => Period::Defined { seconds },
        _ => Period::Undefined,
    }
}
