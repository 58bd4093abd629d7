//! Impulsive manoeuvre utilities: instantaneous delta-v application and the momentum
//! transfer of a kinetic impactor.

pub mod impulse;
pub mod momentum;

use thiserror::Error;

pub use impulse::apply_impulse;
pub use momentum::{ImpulseDirection, KineticImpactor, momentum_delta_v};

#[derive(Debug, Error)]
pub enum ImpulseError {
    #[error("invalid impulse input: {0}")]
    InvalidInput(String),
}
