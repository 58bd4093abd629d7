//! Analytic two-body propagation via Kepler's equation.

use impactor_core::time::seconds_to_days;

use crate::anomaly;
use crate::elements::{ConicKind, OrbitalElements};
use crate::{OrbitError, StateVector, elements_to_state};

/// Advance `elements` by `dt_s` seconds along their unperturbed conic.
///
/// Only the anomaly (and the epoch, when set) changes. Parabolic element sets are rejected
/// because they carry no finite semi-major axis to derive a mean motion from.
pub fn propagate(
    elements: &OrbitalElements,
    dt_s: f64,
    mu_km3_s2: f64,
) -> Result<OrbitalElements, OrbitError> {
    if !dt_s.is_finite() {
        return Err(OrbitError::InvalidInput(format!(
            "propagation interval must be finite, got {dt_s}"
        )));
    }
    let conic = elements.conic();
    if conic == ConicKind::Parabolic {
        return Err(OrbitError::InvalidInput(
            "cannot propagate a parabolic element set".to_string(),
        ));
    }
    let mean_motion = elements.mean_motion(mu_km3_s2).ok_or_else(|| {
        OrbitError::InvalidInput(format!(
            "semi-major axis {} km has no mean motion",
            elements.semi_major_axis_km
        ))
    })?;

    let m0 = anomaly::mean_from_true(elements.true_anomaly_rad, elements.eccentricity)?;
    let m1 = m0 + mean_motion * dt_s;
    let nu = anomaly::true_from_mean(m1, elements.eccentricity)?;

    let mut next = elements.with_true_anomaly(nu);
    next.epoch_jd = elements.epoch_jd.map(|jd| jd + seconds_to_days(dt_s));
    Ok(next)
}

/// Propagate and return the resulting state vector.
pub fn propagate_state(
    elements: &OrbitalElements,
    dt_s: f64,
    mu_km3_s2: f64,
) -> Result<StateVector, OrbitError> {
    let advanced = propagate(elements, dt_s, mu_km3_s2)?;
    elements_to_state(&advanced, mu_km3_s2)
}
