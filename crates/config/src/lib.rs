//! Configuration models and loaders for the kinetic impactor workspace.

use std::fs::File;
use std::path::{Path, PathBuf};

use impactor_core::constants::MU_SUN_KM3_S2;
use serde::Deserialize;
use thiserror::Error;

pub mod lookup;

pub use lookup::{AsteroidLookup, Catalog, Chain, LookupError};

/// Bulk density assumed when a catalog record carries none (kg/m³).
pub const DEFAULT_DENSITY_KG_M3: f64 = 2_600.0;

/// Asteroid record parsed from catalog manifests or converted from a NeoWs response.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AsteroidConfig {
    /// Primary identifier (JPL SPK-ID for NeoWs-sourced records).
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub diameter_min_m: f64,
    pub diameter_max_m: f64,
    #[serde(default)]
    pub density_kg_m3: Option<f64>,
    pub orbit: OrbitConfig,
}

/// Osculating heliocentric elements in catalog units (AU, degrees, Julian date).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct OrbitConfig {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub ascending_node_deg: f64,
    pub perihelion_argument_deg: f64,
    pub mean_anomaly_deg: f64,
    pub epoch_jd: f64,
}

/// Tunables for the impact engine. Every field falls back to its default when omitted.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Central-body gravitational parameter (km³/s²).
    pub mu_sun_km3_s2: f64,
    pub default_density_kg_m3: f64,
    /// Magnitude below which an original value yields no percent change.
    pub percent_epsilon: f64,
    /// Points sampled along each trajectory for the plot payload.
    pub trajectory_samples: usize,
    /// Radius at which open (escape) trajectories are clipped, in AU.
    pub trajectory_max_radius_au: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mu_sun_km3_s2: MU_SUN_KM3_S2,
            default_density_kg_m3: DEFAULT_DENSITY_KG_M3,
            percent_epsilon: 1e-12,
            trajectory_samples: 100,
            trajectory_max_radius_au: 5.0,
        }
    }
}

impl EngineConfig {
    /// Reject settings the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mu_sun_km3_s2.is_finite() && self.mu_sun_km3_s2 > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "mu_sun_km3_s2 must be positive, got {}",
                self.mu_sun_km3_s2
            )));
        }
        if !(self.default_density_kg_m3.is_finite() && self.default_density_kg_m3 > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default_density_kg_m3 must be positive, got {}",
                self.default_density_kg_m3
            )));
        }
        if !(self.percent_epsilon.is_finite() && self.percent_epsilon >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "percent_epsilon must be non-negative, got {}",
                self.percent_epsilon
            )));
        }
        if self.trajectory_samples < 2 {
            return Err(ConfigError::Invalid(format!(
                "trajectory_samples must be at least 2, got {}",
                self.trajectory_samples
            )));
        }
        if !(self.trajectory_max_radius_au.is_finite() && self.trajectory_max_radius_au > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "trajectory_max_radius_au must be positive, got {}",
                self.trajectory_max_radius_au
            )));
        }
        Ok(())
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load asteroid records from a YAML list, a single TOML record, or a directory of TOML records.
pub fn load_asteroids<P: AsRef<Path>>(path: P) -> Result<Vec<AsteroidConfig>, ConfigError> {
    let asteroids: Vec<AsteroidConfig> = load_records(path)?;
    for asteroid in &asteroids {
        if asteroid.diameter_min_m > asteroid.diameter_max_m {
            return Err(ConfigError::Invalid(format!(
                "asteroid '{}' has diameter_min_m {} above diameter_max_m {}",
                asteroid.id, asteroid.diameter_min_m, asteroid.diameter_max_m
            )));
        }
    }
    tracing::debug!(count = asteroids.len(), "loaded asteroid catalog");
    Ok(asteroids)
}

/// Load engine settings from a TOML or YAML file and validate them.
pub fn load_engine_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let config: EngineConfig = if is_toml(path) {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    config.validate()?;
    Ok(config)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
