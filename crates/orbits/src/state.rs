//! Cartesian state vectors in the heliocentric ecliptic inertial frame.

use impactor_core::vector::{self, Vector3};
use serde::{Deserialize, Serialize};

/// Position and velocity of a body at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
}

impl StateVector {
    pub fn new(position_km: Vector3, velocity_km_s: Vector3) -> Self {
        Self {
            position_km,
            velocity_km_s,
        }
    }

    pub fn radius_km(&self) -> f64 {
        vector::norm(&self.position_km)
    }

    pub fn speed_km_s(&self) -> f64 {
        vector::norm(&self.velocity_km_s)
    }

    /// Specific angular momentum `r × v` (km²/s).
    pub fn angular_momentum(&self) -> Vector3 {
        vector::cross(&self.position_km, &self.velocity_km_s)
    }

    pub fn is_finite(&self) -> bool {
        vector::is_finite(&self.position_km) && vector::is_finite(&self.velocity_km_s)
    }
}
