//! Asteroid lookup seam. The engine only sees the [`AsteroidLookup`] trait, so network and
//! disk-backed sources stay outside the computational core.

use std::path::Path;

use thiserror::Error;

use crate::{AsteroidConfig, ConfigError, load_asteroids};

/// Errors raised by lookup sources; the engine propagates them unchanged.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("asteroid '{0}' not found")]
    NotFound(String),
    #[error("asteroid source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record for asteroid '{id}': {reason}")]
    Malformed { id: String, reason: String },
}

/// Resolves an asteroid identifier into its catalog record.
pub trait AsteroidLookup {
    fn lookup(&self, id: &str) -> Result<AsteroidConfig, LookupError>;
}

/// In-memory catalog matching ids, names, and aliases case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<AsteroidConfig>,
}

impl Catalog {
    pub fn new(records: Vec<AsteroidConfig>) -> Self {
        Self { records }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Self::new(load_asteroids(path)?))
    }

    pub fn records(&self) -> &[AsteroidConfig] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AsteroidLookup for Catalog {
    fn lookup(&self, id: &str) -> Result<AsteroidConfig, LookupError> {
        let wanted = id.trim();
        self.records
            .iter()
            .find(|record| {
                record.id.eq_ignore_ascii_case(wanted)
                    || record.name.eq_ignore_ascii_case(wanted)
                    || record
                        .aliases
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(wanted))
            })
            .cloned()
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }
}

/// Ordered set of lookup sources. A source answering `NotFound` passes the request on; any
/// other error stops the chain.
#[derive(Default)]
pub struct Chain<'a> {
    sources: Vec<&'a dyn AsteroidLookup>,
}

impl<'a> Chain<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: &'a dyn AsteroidLookup) -> Self {
        self.sources.push(source);
        self
    }
}

impl AsteroidLookup for Chain<'_> {
    fn lookup(&self, id: &str) -> Result<AsteroidConfig, LookupError> {
        for source in &self.sources {
            match source.lookup(id) {
                Err(LookupError::NotFound(_)) => continue,
                other => return other,
            }
        }
        Err(LookupError::NotFound(id.to_string()))
    }
}
