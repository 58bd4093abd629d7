//! Conversion between classical orbital elements and Cartesian state vectors.
//!
//! The forward transform builds the perifocal position and velocity from `p`, `e` and `ν` and
//! rotates them through the 3-1-3 sequence (Ω, i, ω). The inverse recovers the elements from
//! the angular momentum, eccentricity, and node vectors. Angles are measured with `atan2`
//! about the angular-momentum axis.

use impactor_core::angles::wrap_two_pi;
use impactor_core::vector::{self, Vector3};
use tracing::debug;

use crate::elements::{AngleConvention, OrbitalElements};
use crate::{OrbitError, StateVector};

/// Eccentricity below which ω is treated as undefined.
pub const CIRCULAR_TOLERANCE: f64 = 1e-11;
/// `sin i` below which Ω is treated as undefined.
pub const EQUATORIAL_TOLERANCE: f64 = 1e-11;
/// `|r × v| / (|r||v|)` below which the trajectory is rectilinear.
pub const RECTILINEAR_TOLERANCE: f64 = 1e-12;

/// Convert classical elements into an inertial state vector.
pub fn elements_to_state(
    elements: &OrbitalElements,
    mu_km3_s2: f64,
) -> Result<StateVector, OrbitError> {
    check_mu(mu_km3_s2)?;
    elements.validate_angles()?;
    if !(elements.eccentricity.is_finite() && elements.eccentricity >= 0.0) {
        return Err(OrbitError::InvalidInput(format!(
            "eccentricity must be finite and non-negative, got {}",
            elements.eccentricity
        )));
    }
    let p = elements.semi_latus_rectum_km();
    if !(p.is_finite() && p > 0.0) {
        return Err(OrbitError::InvalidInput(format!(
            "semi-latus rectum must be positive and finite (a = {}, e = {})",
            elements.semi_major_axis_km, elements.eccentricity
        )));
    }
    let denom = 1.0 + elements.eccentricity * elements.true_anomaly_rad.cos();
    if denom <= 0.0 {
        return Err(OrbitError::InvalidInput(format!(
            "true anomaly {} rad lies beyond the asymptote of an e = {} conic",
            elements.true_anomaly_rad, elements.eccentricity
        )));
    }

    Ok(state_from_conic(
        p,
        elements.eccentricity,
        elements.inclination_rad,
        elements.raan_rad,
        elements.arg_periapsis_rad,
        elements.true_anomaly_rad,
        mu_km3_s2,
    ))
}

/// Evaluate the conic defined by `p` and `e` at true anomaly `nu_rad` and rotate into the
/// inertial frame. Callers guarantee `p > 0` and `1 + e·cos ν > 0`.
pub fn state_from_conic(
    p_km: f64,
    eccentricity: f64,
    inclination_rad: f64,
    raan_rad: f64,
    arg_periapsis_rad: f64,
    nu_rad: f64,
    mu_km3_s2: f64,
) -> StateVector {
    let (sin_nu, cos_nu) = nu_rad.sin_cos();
    let r = p_km / (1.0 + eccentricity * cos_nu);
    let position_pf = [r * cos_nu, r * sin_nu, 0.0];
    let k = (mu_km3_s2 / p_km).sqrt();
    let velocity_pf = [-k * sin_nu, k * (eccentricity + cos_nu), 0.0];

    let rotation = PerifocalRotation::new(raan_rad, inclination_rad, arg_periapsis_rad);
    StateVector::new(rotation.apply(&position_pf), rotation.apply(&velocity_pf))
}

/// Recover classical elements from an inertial state vector.
///
/// Circular and equatorial geometries substitute an alternate angle and record which one in
/// [`OrbitalElements::convention`] instead of failing.
pub fn state_to_elements(
    state: &StateVector,
    mu_km3_s2: f64,
) -> Result<OrbitalElements, OrbitError> {
    check_mu(mu_km3_s2)?;
    if !state.is_finite() {
        return Err(OrbitError::InvalidInput(
            "state vector contains non-finite components".to_string(),
        ));
    }

    let r = state.position_km;
    let v = state.velocity_km_s;
    let r_mag = vector::norm(&r);
    let v_mag = vector::norm(&v);
    if r_mag == 0.0 {
        return Err(OrbitError::InvalidInput(
            "position coincides with the central body".to_string(),
        ));
    }

    let h = vector::cross(&r, &v);
    let h_mag = vector::norm(&h);
    if h_mag <= RECTILINEAR_TOLERANCE * r_mag * v_mag || h_mag == 0.0 {
        return Err(OrbitError::Degenerate {
            angular_momentum_km2_s: h_mag,
        });
    }
    let h_hat = vector::scale(&h, 1.0 / h_mag);

    // e = (v × h)/μ − r/|r|
    let e_vec = vector::sub(
        &vector::scale(&vector::cross(&v, &h), 1.0 / mu_km3_s2),
        &vector::scale(&r, 1.0 / r_mag),
    );
    let eccentricity = vector::norm(&e_vec);

    // vis-viva: 1/a = 2/r − v²/μ
    let inverse_a = 2.0 / r_mag - v_mag * v_mag / mu_km3_s2;
    let semi_major_axis_km = if inverse_a.abs() * r_mag < f64::EPSILON {
        f64::INFINITY
    } else {
        1.0 / inverse_a
    };

    let node = [-h[1], h[0], 0.0];
    let node_mag = vector::norm(&node);
    let inclination_rad = node_mag.atan2(h[2]);

    let circular = eccentricity < CIRCULAR_TOLERANCE;
    let equatorial = node_mag / h_mag < EQUATORIAL_TOLERANCE;

    // Ω = 0 puts the line of nodes on the x axis when the node vector vanishes.
    let (raan_rad, node_ref) = if equatorial {
        (0.0, [1.0, 0.0, 0.0])
    } else {
        (wrap_two_pi(h[0].atan2(-h[1])), node)
    };

    let (arg_periapsis_rad, true_anomaly_rad) = if circular {
        (0.0, angle_about(&node_ref, &r, &h_hat))
    } else {
        (
            angle_about(&node_ref, &e_vec, &h_hat),
            angle_about(&e_vec, &r, &h_hat),
        )
    };

    let convention = match (circular, equatorial) {
        (false, false) => AngleConvention::Standard,
        (true, false) => AngleConvention::CircularInclined,
        (false, true) => AngleConvention::EllipticalEquatorial,
        (true, true) => AngleConvention::CircularEquatorial,
    };
    if convention != AngleConvention::Standard {
        debug!(
            ?convention,
            eccentricity, inclination_rad, "substituted undefined orbital angle"
        );
    }

    Ok(OrbitalElements {
        semi_major_axis_km,
        eccentricity,
        inclination_rad,
        raan_rad,
        arg_periapsis_rad,
        true_anomaly_rad,
        epoch_jd: None,
        convention,
    })
}

/// Angle swept from `from` to `to` about the unit `axis`, in `[0, 2π)`.
fn angle_about(from: &Vector3, to: &Vector3, axis: &Vector3) -> f64 {
    let sin_part = vector::dot(axis, &vector::cross(from, to));
    let cos_part = vector::dot(from, to);
    wrap_two_pi(sin_part.atan2(cos_part))
}

fn check_mu(mu_km3_s2: f64) -> Result<(), OrbitError> {
    if mu_km3_s2.is_finite() && mu_km3_s2 > 0.0 {
        Ok(())
    } else {
        Err(OrbitError::InvalidInput(format!(
            "gravitational parameter must be positive, got {mu_km3_s2}"
        )))
    }
}

/// Perifocal → inertial rotation `R3(−Ω)·R1(−i)·R3(−ω)`; only the first two columns are
/// needed because perifocal vectors have no z component.
struct PerifocalRotation {
    p: Vector3,
    q: Vector3,
}

impl PerifocalRotation {
    fn new(raan: f64, inclination: f64, arg_periapsis: f64) -> Self {
        let (so, co) = raan.sin_cos();
        let (si, ci) = inclination.sin_cos();
        let (sw, cw) = arg_periapsis.sin_cos();
        Self {
            p: [co * cw - so * sw * ci, so * cw + co * sw * ci, sw * si],
            q: [-co * sw - so * cw * ci, -so * sw + co * cw * ci, cw * si],
        }
    }

    fn apply(&self, v: &Vector3) -> Vector3 {
        [
            self.p[0] * v[0] + self.q[0] * v[1],
            self.p[1] * v[0] + self.q[1] * v[1],
            self.p[2] * v[0] + self.q[2] * v[1],
        ]
    }
}
