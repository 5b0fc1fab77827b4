//! Runtime configuration read from environment variables.
//!
//! | variable              | default                   |
//! |-----------------------|---------------------------|
//! | `POPTRENDS_BIND`      | `$HOST:$PORT`             |
//! | `HOST`                | `0.0.0.0`                 |
//! | `PORT`                | `8080`                    |
//! | `POPTRENDS_DATASET`   | `country_development.tsv` |
//! | `POPTRENDS_REFERENCE` | embedded reference data   |

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::data::{DataRegistry, DEFAULT_DATASET_PATH};
use crate::error::LoadError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub dataset_path: PathBuf,
    pub reference_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = get("POPTRENDS_BIND").unwrap_or_else(|| {
            let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
            let port = match get("PORT") {
                Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                    warn!(value = %raw, default = DEFAULT_PORT, "invalid PORT, using default");
                    DEFAULT_PORT
                }),
                None => DEFAULT_PORT,
            };
            format!("{host}:{port}")
        });

        Self {
            bind_addr,
            dataset_path: get("POPTRENDS_DATASET")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
            reference_path: get("POPTRENDS_REFERENCE").map(PathBuf::from),
        }
    }

    pub fn load_registry(&self) -> Result<Arc<DataRegistry>, LoadError> {
        DataRegistry::load(&self.dataset_path, self.reference_path.as_deref())
    }
}
