//! NASA Near Earth Object Web Service (NeoWs) import utilities.
//!
//! Records are fetched with a blocking client, cached verbatim under `data/neo/`, and parsed
//! into [`AsteroidConfig`] values so both the cache and the live service can serve as an
//! [`AsteroidLookup`].

pub mod neows;

use std::fs;
use std::path::{Path, PathBuf};

use impactor_config::{AsteroidConfig, AsteroidLookup, LookupError};
use thiserror::Error;

pub use neows::{NeoWsClient, parse_neo_record};

/// Directory holding cached NeoWs responses.
pub const LOCAL_NEO_DIR: &str = "data/neo";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed NeoWs response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("field `{field}` has non-numeric value `{value}`")]
    Field { field: &'static str, value: String },
    #[error("asteroid id `{0}` must be alphanumeric")]
    InvalidId(String),
    #[error("asteroid `{0}` not found")]
    NotFound(String),
}

impl ImportError {
    fn into_lookup(self, id: &str) -> LookupError {
        match self {
            ImportError::NotFound(id) => LookupError::NotFound(id),
            ImportError::InvalidId(_) => LookupError::NotFound(id.to_string()),
            ImportError::Network(_) | ImportError::Io(_) => LookupError::Unavailable(self.to_string()),
            ImportError::Json(_) | ImportError::Field { .. } => LookupError::Malformed {
                id: id.to_string(),
                reason: self.to_string(),
            },
        }
    }
}

pub(crate) fn validate_id(id: &str) -> Result<&str, ImportError> {
    let id = id.trim();
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(id)
    } else {
        Err(ImportError::InvalidId(id.to_string()))
    }
}

/// Directory of raw NeoWs responses named `<id>.json`.
#[derive(Debug, Clone)]
pub struct NeoCache {
    dir: PathBuf,
}

impl Default for NeoCache {
    fn default() -> Self {
        Self::new(LOCAL_NEO_DIR)
    }
}

impl NeoCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &str) -> Result<PathBuf, ImportError> {
        Ok(self.dir.join(format!("{}.json", validate_id(id)?)))
    }

    /// Persist a raw response body after checking that it parses.
    pub fn store(&self, id: &str, body: &str) -> Result<PathBuf, ImportError> {
        parse_neo_record(body)?;
        let path = self.path_for(id)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, body)?;
        Ok(path)
    }

    pub fn load(&self, id: &str) -> Result<AsteroidConfig, ImportError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(ImportError::NotFound(id.to_string()));
        }
        parse_neo_record(&fs::read_to_string(path)?)
    }
}

impl AsteroidLookup for NeoCache {
    fn lookup(&self, id: &str) -> Result<AsteroidConfig, LookupError> {
        self.load(id).map_err(|err| err.into_lookup(id))
    }
}
