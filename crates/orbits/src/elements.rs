//! Classical (osculating) orbital elements.

use std::f64::consts::TAU;

use impactor_core::angles::deg_to_rad;
use impactor_core::units::au_to_km;
use serde::{Deserialize, Serialize};

use crate::OrbitError;

/// Eccentricity band around 1 treated as parabolic.
pub const PARABOLIC_TOLERANCE: f64 = 1e-10;

/// Which angles carry meaning when Ω or ω is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleConvention {
    /// Ω, ω, ν are all well defined.
    #[default]
    Standard,
    /// Circular, inclined: ω is fixed at zero and ν holds the argument of latitude.
    CircularInclined,
    /// Eccentric, equatorial: Ω is fixed at zero and ω holds the longitude of periapsis.
    EllipticalEquatorial,
    /// Circular, equatorial: Ω and ω are zero and ν holds the true longitude.
    CircularEquatorial,
}

/// Conic section family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConicKind {
    Elliptic,
    Parabolic,
    Hyperbolic,
}

/// Classical two-body orbital elements.
///
/// The semi-major axis is negative for hyperbolic conics and infinite for an exactly
/// parabolic one. Angles are stored in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_rad: f64,
    /// Longitude of the ascending node (Ω).
    pub raan_rad: f64,
    /// Argument of periapsis (ω).
    pub arg_periapsis_rad: f64,
    /// True anomaly (ν) at the reference epoch.
    pub true_anomaly_rad: f64,
    /// Reference epoch as a Julian date (TDB), when known.
    #[serde(default)]
    pub epoch_jd: Option<f64>,
    #[serde(default)]
    pub convention: AngleConvention,
}

impl OrbitalElements {
    /// Build elements from boundary units: AU and degrees.
    pub fn from_degrees(
        a_au: f64,
        eccentricity: f64,
        inclination_deg: f64,
        raan_deg: f64,
        arg_periapsis_deg: f64,
        true_anomaly_deg: f64,
    ) -> Self {
        Self {
            semi_major_axis_km: au_to_km(a_au),
            eccentricity,
            inclination_rad: deg_to_rad(inclination_deg),
            raan_rad: deg_to_rad(raan_deg),
            arg_periapsis_rad: deg_to_rad(arg_periapsis_deg),
            true_anomaly_rad: deg_to_rad(true_anomaly_deg),
            epoch_jd: None,
            convention: AngleConvention::Standard,
        }
    }

    /// Validated constructor for the bound (elliptical) case.
    pub fn elliptical(
        semi_major_axis_km: f64,
        eccentricity: f64,
        inclination_rad: f64,
        raan_rad: f64,
        arg_periapsis_rad: f64,
        true_anomaly_rad: f64,
    ) -> Result<Self, OrbitError> {
        let elements = Self {
            semi_major_axis_km,
            eccentricity,
            inclination_rad,
            raan_rad,
            arg_periapsis_rad,
            true_anomaly_rad,
            epoch_jd: None,
            convention: AngleConvention::Standard,
        };
        elements.validate_elliptical()?;
        Ok(elements)
    }

    pub fn with_epoch(mut self, epoch_jd: f64) -> Self {
        self.epoch_jd = Some(epoch_jd);
        self
    }

    pub fn with_true_anomaly(mut self, true_anomaly_rad: f64) -> Self {
        self.true_anomaly_rad = true_anomaly_rad;
        self
    }

    /// Check the bound-orbit invariants: `a > 0`, `0 ≤ e < 1`, finite angles.
    pub fn validate_elliptical(&self) -> Result<(), OrbitError> {
        if !(self.semi_major_axis_km.is_finite() && self.semi_major_axis_km > 0.0) {
            return Err(OrbitError::InvalidInput(format!(
                "semi-major axis must be positive and finite, got {}",
                self.semi_major_axis_km
            )));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(OrbitError::InvalidInput(format!(
                "eccentricity must lie in [0, 1) for a bound orbit, got {}",
                self.eccentricity
            )));
        }
        self.validate_angles()
    }

    pub(crate) fn validate_angles(&self) -> Result<(), OrbitError> {
        let angles = [
            ("inclination", self.inclination_rad),
            ("ascending node", self.raan_rad),
            ("argument of periapsis", self.arg_periapsis_rad),
            ("true anomaly", self.true_anomaly_rad),
        ];
        for (label, value) in angles {
            if !value.is_finite() {
                return Err(OrbitError::InvalidInput(format!(
                    "{label} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn conic(&self) -> ConicKind {
        if (self.eccentricity - 1.0).abs() <= PARABOLIC_TOLERANCE {
            ConicKind::Parabolic
        } else if self.eccentricity < 1.0 {
            ConicKind::Elliptic
        } else {
            ConicKind::Hyperbolic
        }
    }

    pub fn is_bound(&self) -> bool {
        self.conic() == ConicKind::Elliptic && self.semi_major_axis_km > 0.0
    }

    /// Semi-latus rectum `p = a(1 − e²)`; NaN for a parabolic element set.
    pub fn semi_latus_rectum_km(&self) -> f64 {
        if self.semi_major_axis_km.is_finite() {
            self.semi_major_axis_km * (1.0 - self.eccentricity * self.eccentricity)
        } else {
            f64::NAN
        }
    }

    pub fn periapsis_radius_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity)
    }

    /// Apoapsis radius, or `None` for open conics.
    pub fn apoapsis_radius_km(&self) -> Option<f64> {
        self.is_bound()
            .then(|| self.semi_major_axis_km * (1.0 + self.eccentricity))
    }

    /// Mean motion (rad/s) for elliptic and hyperbolic conics.
    pub fn mean_motion(&self, mu_km3_s2: f64) -> Option<f64> {
        let a = self.semi_major_axis_km.abs();
        (a.is_finite() && a > 0.0).then(|| (mu_km3_s2 / (a * a * a)).sqrt())
    }

    /// Kepler's third law `T = 2π√(a³/μ)`; `None` once the orbit is no longer bound.
    pub fn period_seconds(&self, mu_km3_s2: f64) -> Option<f64> {
        if !self.is_bound() {
            return None;
        }
        self.mean_motion(mu_km3_s2).map(|n| TAU / n)
    }

    /// Specific orbital energy `−μ/(2a)` (km²/s²); zero for a parabola.
    pub fn specific_energy(&self, mu_km3_s2: f64) -> f64 {
        if self.semi_major_axis_km.is_finite() {
            -mu_km3_s2 / (2.0 * self.semi_major_axis_km)
        } else {
            0.0
        }
    }
}
