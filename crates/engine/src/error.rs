//! Engine error surface and its serializable failure form.

use impactor_config::{ConfigError, LookupError};
use impactor_impulsive::ImpulseError;
use impactor_orbits::OrbitError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImpactError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("degenerate orbit: {0}")]
    DegenerateOrbit(String),
    #[error("asteroid lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

impl From<OrbitError> for ImpactError {
    fn from(err: OrbitError) -> Self {
        match err {
            OrbitError::Degenerate { .. } => ImpactError::DegenerateOrbit(err.to_string()),
            OrbitError::InvalidInput(_) | OrbitError::NoConvergence { .. } => {
                ImpactError::InvalidInput(err.to_string())
            }
        }
    }
}

impl From<ImpulseError> for ImpactError {
    fn from(err: ImpulseError) -> Self {
        ImpactError::InvalidInput(err.to_string())
    }
}

impl From<ConfigError> for ImpactError {
    fn from(err: ConfigError) -> Self {
        ImpactError::InvalidInput(err.to_string())
    }
}

/// Error category reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    DegenerateOrbit,
    Lookup,
}

impl ImpactError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImpactError::InvalidInput(_) => ErrorKind::InvalidInput,
            ImpactError::DegenerateOrbit(_) => ErrorKind::DegenerateOrbit,
            ImpactError::Lookup(_) => ErrorKind::Lookup,
        }
    }
}

/// Structured failure (`{"kind": ..., "message": ...}`) handed to the calling layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ImpactError> for Failure {
    fn from(err: &ImpactError) -> Self {
        Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
