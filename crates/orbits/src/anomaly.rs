//! Anomaly conversions and Kepler's equation.
//!
//! Elliptic orbits use the eccentric anomaly `E` with `M = E − e·sin E`; hyperbolic orbits use
//! the hyperbolic anomaly `H` with `M = e·sinh H − H`.

use impactor_core::angles::{wrap_pi, wrap_two_pi};

use crate::OrbitError;

const MAX_ITERATIONS: usize = 50;
const TOLERANCE: f64 = 1e-14;

/// Solve `M = E − e·sin E` for `E` (elliptic, `0 ≤ e < 1`).
pub fn eccentric_from_mean(mean_anomaly_rad: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    if !(0.0..1.0).contains(&eccentricity) || !mean_anomaly_rad.is_finite() {
        return Err(OrbitError::InvalidInput(format!(
            "elliptic Kepler solve needs 0 ≤ e < 1 and finite M (e = {eccentricity}, M = {mean_anomaly_rad})"
        )));
    }
    let m = wrap_pi(mean_anomaly_rad);
    let mut e_anom = if eccentricity < 0.8 {
        m
    } else {
        std::f64::consts::PI.copysign(m)
    };
    for _ in 0..MAX_ITERATIONS {
        let (sin_e, cos_e) = e_anom.sin_cos();
        let f = e_anom - eccentricity * sin_e - m;
        let delta = f / (1.0 - eccentricity * cos_e);
        e_anom -= delta;
        if delta.abs() < TOLERANCE {
            return Ok(e_anom);
        }
    }
    let residual = e_anom - eccentricity * e_anom.sin() - m;
    if residual.abs() < 1e-10 {
        Ok(e_anom)
    } else {
        Err(OrbitError::NoConvergence {
            iterations: MAX_ITERATIONS,
            mean_anomaly: mean_anomaly_rad,
            eccentricity,
        })
    }
}

/// Solve `M = e·sinh H − H` for `H` (hyperbolic, `e > 1`).
pub fn hyperbolic_from_mean(mean_anomaly_rad: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    if !(eccentricity > 1.0 && eccentricity.is_finite()) || !mean_anomaly_rad.is_finite() {
        return Err(OrbitError::InvalidInput(format!(
            "hyperbolic Kepler solve needs e > 1 and finite M (e = {eccentricity}, M = {mean_anomaly_rad})"
        )));
    }
    let m = mean_anomaly_rad;
    let mut h_anom = (m / eccentricity).asinh();
    for _ in 0..MAX_ITERATIONS {
        let f = eccentricity * h_anom.sinh() - h_anom - m;
        let delta = f / (eccentricity * h_anom.cosh() - 1.0);
        h_anom -= delta;
        if delta.abs() < TOLERANCE * h_anom.abs().max(1.0) {
            return Ok(h_anom);
        }
    }
    Err(OrbitError::NoConvergence {
        iterations: MAX_ITERATIONS,
        mean_anomaly: mean_anomaly_rad,
        eccentricity,
    })
}

pub fn true_from_eccentric(eccentric_anomaly_rad: f64, eccentricity: f64) -> f64 {
    let half = 0.5 * eccentric_anomaly_rad;
    let nu = 2.0
        * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos());
    wrap_two_pi(nu)
}

pub fn eccentric_from_true(true_anomaly_rad: f64, eccentricity: f64) -> f64 {
    let half = 0.5 * true_anomaly_rad;
    2.0 * ((1.0 - eccentricity).sqrt() * half.sin()).atan2((1.0 + eccentricity).sqrt() * half.cos())
}

pub fn true_from_hyperbolic(hyperbolic_anomaly_rad: f64, eccentricity: f64) -> f64 {
    let ratio = ((eccentricity + 1.0) / (eccentricity - 1.0)).sqrt();
    2.0 * (ratio * (0.5 * hyperbolic_anomaly_rad).tanh()).atan()
}

pub fn hyperbolic_from_true(true_anomaly_rad: f64, eccentricity: f64) -> f64 {
    let ratio = ((eccentricity - 1.0) / (eccentricity + 1.0)).sqrt();
    2.0 * (ratio * (0.5 * wrap_pi(true_anomaly_rad)).tan()).atanh()
}

/// Mean anomaly → true anomaly for elliptic or hyperbolic conics.
pub fn true_from_mean(mean_anomaly_rad: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    if eccentricity < 1.0 {
        let e_anom = eccentric_from_mean(mean_anomaly_rad, eccentricity)?;
        Ok(true_from_eccentric(e_anom, eccentricity))
    } else if eccentricity > 1.0 {
        let h_anom = hyperbolic_from_mean(mean_anomaly_rad, eccentricity)?;
        Ok(true_from_hyperbolic(h_anom, eccentricity))
    } else {
        Err(OrbitError::InvalidInput(
            "mean anomaly is undefined for a parabolic conic".to_string(),
        ))
    }
}

/// True anomaly → mean anomaly for elliptic or hyperbolic conics.
///
/// Elliptic results are wrapped into `[0, 2π)`; hyperbolic results are signed.
pub fn mean_from_true(true_anomaly_rad: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    if eccentricity < 1.0 {
        let e_anom = eccentric_from_true(true_anomaly_rad, eccentricity);
        Ok(wrap_two_pi(e_anom - eccentricity * e_anom.sin()))
    } else if eccentricity > 1.0 {
        let h_anom = hyperbolic_from_true(true_anomaly_rad, eccentricity);
        Ok(eccentricity * h_anom.sinh() - h_anom)
    } else {
        Err(OrbitError::InvalidInput(
            "mean anomaly is undefined for a parabolic conic".to_string(),
        ))
    }
}
