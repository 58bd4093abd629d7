//! NeoWs client and response parsing.

use impactor_config::{AsteroidConfig, AsteroidLookup, LookupError, OrbitConfig};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{ImportError, validate_id};

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/neo/rest/v1/neo";
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Blocking NeoWs lookup client.
#[derive(Debug, Clone)]
pub struct NeoWsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NeoWsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ImportError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn url_for(&self, id: &str) -> Result<String, ImportError> {
        Ok(format!("{}/{}", self.base_url, validate_id(id)?))
    }

    /// Fetch the raw JSON body for `id`.
    pub fn fetch_raw(&self, id: &str) -> Result<String, ImportError> {
        let url = self.url_for(id)?;
        tracing::info!(%url, "fetching NeoWs record");
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ImportError::NotFound(id.to_string()));
        }
        Ok(response.error_for_status()?.text()?)
    }

    pub fn fetch(&self, id: &str) -> Result<AsteroidConfig, ImportError> {
        parse_neo_record(&self.fetch_raw(id)?)
    }
}

impl AsteroidLookup for NeoWsClient {
    fn lookup(&self, id: &str) -> Result<AsteroidConfig, LookupError> {
        self.fetch(id).map_err(|err| err.into_lookup(id))
    }
}

#[derive(Debug, Deserialize)]
struct NeoRecord {
    id: String,
    name: String,
    #[serde(default)]
    designation: Option<String>,
    estimated_diameter: EstimatedDiameter,
    orbital_data: OrbitalData,
}

#[derive(Debug, Deserialize)]
struct EstimatedDiameter {
    meters: DiameterRange,
}

#[derive(Debug, Deserialize)]
struct DiameterRange {
    estimated_diameter_min: Numeric,
    estimated_diameter_max: Numeric,
}

/// NeoWs encodes most orbital quantities as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self, field: &'static str) -> Result<f64, ImportError> {
        match self {
            Numeric::Number(v) => Ok(*v),
            Numeric::Text(s) => s.trim().parse().map_err(|_| ImportError::Field {
                field,
                value: s.clone(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrbitalData {
    epoch_osculation: Numeric,
    eccentricity: Numeric,
    semi_major_axis: Numeric,
    inclination: Numeric,
    ascending_node_longitude: Numeric,
    perihelion_argument: Numeric,
    mean_anomaly: Numeric,
}

/// Parse a NeoWs `neo/{id}` response into a catalog record.
pub fn parse_neo_record(body: &str) -> Result<AsteroidConfig, ImportError> {
    let record: NeoRecord = serde_json::from_str(body)?;
    let od = &record.orbital_data;
    let diameters = &record.estimated_diameter.meters;

    let orbit = OrbitConfig {
        semi_major_axis_au: od.semi_major_axis.value("semi_major_axis")?,
        eccentricity: od.eccentricity.value("eccentricity")?,
        inclination_deg: od.inclination.value("inclination")?,
        ascending_node_deg: od.ascending_node_longitude.value("ascending_node_longitude")?,
        perihelion_argument_deg: od.perihelion_argument.value("perihelion_argument")?,
        mean_anomaly_deg: od.mean_anomaly.value("mean_anomaly")?,
        epoch_jd: od.epoch_osculation.value("epoch_osculation")?,
    };

    Ok(AsteroidConfig {
        id: record.id,
        name: record.name,
        aliases: record.designation.into_iter().collect(),
        diameter_min_m: diameters
            .estimated_diameter_min
            .value("estimated_diameter_min")?,
        diameter_max_m: diameters
            .estimated_diameter_max
            .value("estimated_diameter_max")?,
        density_kg_m3: None,
        orbit,
    })
}
