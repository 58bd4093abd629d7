//! Momentum transfer from a kinetic impactor.
//!
//! The asteroid receives `Δv = β·m·v / M`, where `m` and `v` are the spacecraft mass and
//! relative impact speed, `M` the asteroid mass, and `β` the momentum enhancement factor
//! (1 for a perfectly inelastic hit, larger when ejecta add recoil).

use impactor_core::units::ms_to_kms;
use impactor_core::vector::{self, Vector3};
use impactor_orbits::StateVector;
use serde::{Deserialize, Serialize};

use crate::ImpulseError;

/// Direction along which the impactor pushes the asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpulseDirection {
    /// Along the heliocentric velocity (prograde): raises the orbit.
    Along,
    /// Against the heliocentric velocity (retrograde): lowers the orbit.
    Against,
    /// Outward along the Sun–asteroid radius vector.
    Radial,
}

/// Spacecraft parameters for a kinetic impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticImpactor {
    pub mass_kg: f64,
    pub velocity_m_s: f64,
    /// Momentum enhancement factor.
    pub beta: f64,
}

impl KineticImpactor {
    /// Speed change (m/s) imparted to an asteroid of `asteroid_mass_kg`.
    pub fn delta_v_magnitude_m_s(&self, asteroid_mass_kg: f64) -> Result<f64, ImpulseError> {
        let checks = [
            ("spacecraft mass", self.mass_kg),
            ("impact velocity", self.velocity_m_s),
            ("beta", self.beta),
            ("asteroid mass", asteroid_mass_kg),
        ];
        for (label, value) in checks {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ImpulseError::InvalidInput(format!(
                    "{label} must be finite and non-negative, got {value}"
                )));
            }
        }
        if asteroid_mass_kg == 0.0 {
            return Err(ImpulseError::InvalidInput(
                "asteroid mass must be positive".to_string(),
            ));
        }
        Ok(self.beta * self.mass_kg * self.velocity_m_s / asteroid_mass_kg)
    }
}

/// Delta-v vector (km/s) imparted by `impactor` on an asteroid at `state`.
pub fn momentum_delta_v(
    impactor: &KineticImpactor,
    asteroid_mass_kg: f64,
    state: &StateVector,
    direction: ImpulseDirection,
) -> Result<Vector3, ImpulseError> {
    let magnitude_km_s = ms_to_kms(impactor.delta_v_magnitude_m_s(asteroid_mass_kg)?);
    let (reference, sign) = match direction {
        ImpulseDirection::Along => (&state.velocity_km_s, 1.0),
        ImpulseDirection::Against => (&state.velocity_km_s, -1.0),
        ImpulseDirection::Radial => (&state.position_km, 1.0),
    };
    let unit = vector::unit(reference).ok_or_else(|| {
        ImpulseError::InvalidInput(format!(
            "cannot derive a {direction:?} direction from a zero-length reference vector"
        ))
    })?;
    Ok(vector::scale(&unit, sign * magnitude_km_s))
}
