//! Instantaneous velocity change in the impulsive approximation.

use impactor_core::vector::{self, Vector3};
use impactor_orbits::StateVector;

use crate::ImpulseError;

/// Add `delta_v_km_s` to the velocity of `state`; the position is left untouched.
///
/// A zero impulse returns a state bit-identical to the input.
pub fn apply_impulse(state: &StateVector, delta_v_km_s: &Vector3) -> Result<StateVector, ImpulseError> {
    if !state.is_finite() {
        return Err(ImpulseError::InvalidInput(
            "state vector contains non-finite components".to_string(),
        ));
    }
    if !vector::is_finite(delta_v_km_s) {
        return Err(ImpulseError::InvalidInput(format!(
            "delta-v contains non-finite components: {delta_v_km_s:?}"
        )));
    }
    Ok(StateVector {
        position_km: state.position_km,
        velocity_km_s: vector::add(&state.velocity_km_s, delta_v_km_s),
    })
}
