//! Before/after comparison of the tracked orbital quantities.
//!
//! Reporting units: semi-major axis in AU, inclination in degrees, period in days.

use impactor_core::angles::rad_to_deg;
use impactor_core::time::seconds_to_days;
use impactor_core::units::km_to_au;
use impactor_orbits::OrbitalElements;
use serde::Serialize;

use crate::determination::DeterminedOrbit;

/// One tracked scalar before and after the impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalChange {
    pub original: f64,
    #[serde(rename = "final")]
    pub final_value: f64,
    pub change: f64,
    /// `None` (JSON `null`) when the original value is too close to zero to divide by.
    pub percent_change: Option<f64>,
}

impl OrbitalChange {
    pub fn new(original: f64, final_value: f64, epsilon: f64) -> Self {
        let change = final_value - original;
        let percent_change = (original.abs() >= epsilon && original != 0.0)
            .then(|| 100.0 * change / original)
            .filter(|p| p.is_finite());
        Self {
            original,
            final_value,
            change,
            percent_change,
        }
    }
}

/// A tracked quantity, or the marker that it has no value after the impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChangeEntry {
    Defined(OrbitalChange),
    Undefined { original: f64 },
}

impl ChangeEntry {
    fn between(original: f64, final_value: Option<f64>, epsilon: f64) -> Self {
        match final_value {
            Some(value) if value.is_finite() && original.is_finite() => {
                ChangeEntry::Defined(OrbitalChange::new(original, value, epsilon))
            }
            _ => ChangeEntry::Undefined { original },
        }
    }

    pub fn as_defined(&self) -> Option<&OrbitalChange> {
        match self {
            ChangeEntry::Defined(change) => Some(change),
            ChangeEntry::Undefined { .. } => None,
        }
    }

    pub fn original(&self) -> f64 {
        match self {
            ChangeEntry::Defined(change) => change.original,
            ChangeEntry::Undefined { original } => *original,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ChangeEntry::Undefined { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKey {
    SemiMajorAxis,
    Eccentricity,
    Inclination,
    Period,
}

impl ChangeKey {
    pub const ALL: [ChangeKey; 4] = [
        ChangeKey::SemiMajorAxis,
        ChangeKey::Eccentricity,
        ChangeKey::Inclination,
        ChangeKey::Period,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKey::SemiMajorAxis => "semi_major_axis",
            ChangeKey::Eccentricity => "eccentricity",
            ChangeKey::Inclination => "inclination",
            ChangeKey::Period => "period",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ChangeKey::SemiMajorAxis => "AU",
            ChangeKey::Eccentricity => "",
            ChangeKey::Inclination => "deg",
            ChangeKey::Period => "days",
        }
    }
}

/// Fixed set of tracked changes, serialized as a keyed object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalChanges {
    pub semi_major_axis: ChangeEntry,
    pub eccentricity: ChangeEntry,
    pub inclination: ChangeEntry,
    pub period: ChangeEntry,
}

impl OrbitalChanges {
    pub fn get(&self, key: ChangeKey) -> &ChangeEntry {
        match key {
            ChangeKey::SemiMajorAxis => &self.semi_major_axis,
            ChangeKey::Eccentricity => &self.eccentricity,
            ChangeKey::Inclination => &self.inclination,
            ChangeKey::Period => &self.period,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChangeKey, &ChangeEntry)> {
        ChangeKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// Compare two element sets under the same gravitational parameter.
pub fn compute_changes(
    before: &OrbitalElements,
    after: &OrbitalElements,
    mu_km3_s2: f64,
    epsilon: f64,
) -> OrbitalChanges {
    compute_orbit_changes(
        &DeterminedOrbit::from_elements(*before, mu_km3_s2),
        &DeterminedOrbit::from_elements(*after, mu_km3_s2),
        epsilon,
    )
}

pub(crate) fn compute_orbit_changes(
    before: &DeterminedOrbit,
    after: &DeterminedOrbit,
    epsilon: f64,
) -> OrbitalChanges {
    let sma = |orbit: &DeterminedOrbit| km_to_au(orbit.elements.semi_major_axis_km);
    let period_days = |orbit: &DeterminedOrbit| orbit.period.seconds().map(seconds_to_days);

    OrbitalChanges {
        semi_major_axis: ChangeEntry::between(sma(before), Some(sma(after)), epsilon),
        eccentricity: ChangeEntry::between(
            before.elements.eccentricity,
            Some(after.elements.eccentricity),
            epsilon,
        ),
        inclination: ChangeEntry::between(
            rad_to_deg(before.elements.inclination_rad),
            Some(rad_to_deg(after.elements.inclination_rad)),
            epsilon,
        ),
        period: ChangeEntry::between(
            period_days(before).unwrap_or(f64::NAN),
            period_days(after),
            epsilon,
        ),
    }
}
