//! Physical property estimates for the target asteroid.

use impactor_core::vector::{self, Vector3};

use crate::ImpactError;

/// Spherical-body mass `ρ·(4/3)π(d/2)³` in kilograms.
pub fn estimate_mass(diameter_m: f64, density_kg_m3: f64) -> Result<f64, ImpactError> {
    if !(diameter_m.is_finite() && diameter_m > 0.0) {
        return Err(ImpactError::InvalidInput(format!(
            "diameter must be positive, got {diameter_m} m"
        )));
    }
    if !(density_kg_m3.is_finite() && density_kg_m3 > 0.0) {
        return Err(ImpactError::InvalidInput(format!(
            "bulk density must be positive, got {density_kg_m3} kg/m³"
        )));
    }
    let radius = 0.5 * diameter_m;
    Ok(density_kg_m3 * 4.0 / 3.0 * std::f64::consts::PI * radius.powi(3))
}

/// Maneuver cost: magnitude of the applied delta-v, in km/s.
pub fn maneuver_cost(delta_v_km_s: &Vector3) -> f64 {
    vector::norm(delta_v_km_s)
}

/// Midpoint of an estimated diameter range.
pub fn mean_diameter(min_m: f64, max_m: f64) -> Result<f64, ImpactError> {
    if !(min_m.is_finite() && max_m.is_finite()) || min_m <= 0.0 || max_m < min_m {
        return Err(ImpactError::InvalidInput(format!(
            "diameter range must satisfy 0 < min ≤ max, got [{min_m}, {max_m}] m"
        )));
    }
    Ok(0.5 * (min_m + max_m))
}
