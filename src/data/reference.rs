//! Curated reference data: the aggregate-code denylist and region membership lists.
//! The embedded default ships with the binary; a YAML file can replace it at startup.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::LoadError;

const EMBEDDED_REFERENCE: &str = include_str!("../../config/reference.yaml");

/// One configured region and the country codes sampled as its members.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionDefinition {
    pub name: String,
    pub countries: Vec<String>,
}

impl RegionDefinition {
    pub fn contains(&self, code: &str) -> bool {
        self.countries.iter().any(|c| c == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub aggregate_codes: Vec<String>,
    #[serde(default)]
    pub regions: Vec<RegionDefinition>,
}

impl ReferenceData {
    /// Reference data compiled into the binary from `config/reference.yaml`.
    pub fn embedded() -> Result<Self, LoadError> {
        Self::from_yaml(EMBEDDED_REFERENCE)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

/// Load reference data from `path`, or the embedded default when no path is given.
pub fn load_reference_data(path: Option<&Path>) -> Result<ReferenceData, LoadError> {
    let Some(path) = path else {
        return ReferenceData::embedded();
    };
    let raw =
        fs::read_to_string(path).map_err(|err| LoadError::io(path.display().to_string(), err))?;
    let reference = ReferenceData::from_yaml(&raw)?;
    info!(
        path = %path.display(),
        regions = reference.regions.len(),
        aggregates = reference.aggregate_codes.len(),
        "loaded reference data"
    );
    Ok(reference)
}
