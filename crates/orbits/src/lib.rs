//! Two-body orbit utilities: classical elements, Cartesian state vectors, and the
//! conversions and propagation between them.

pub mod anomaly;
pub mod conversion;
pub mod elements;
pub mod propagation;
pub mod state;

use thiserror::Error;

pub use conversion::{elements_to_state, state_to_elements};
pub use elements::{AngleConvention, ConicKind, OrbitalElements};
pub use state::StateVector;

/// Errors raised by the two-body conversions.
#[derive(Debug, Error)]
pub enum OrbitError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("degenerate orbit: angular momentum {angular_momentum_km2_s:e} km²/s is effectively zero")]
    Degenerate { angular_momentum_km2_s: f64 },
    #[error("Kepler's equation did not converge after {iterations} iterations (M = {mean_anomaly}, e = {eccentricity})")]
    NoConvergence {
        iterations: usize,
        mean_anomaly: f64,
        eccentricity: f64,
    },
}

/// Local escape speed at radius `r_km`.
pub fn escape_speed(mu_km3_s2: f64, r_km: f64) -> f64 {
    (2.0 * mu_km3_s2 / r_km).sqrt()
}
