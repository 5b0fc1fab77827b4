//! Error types shared by the dataset, analytics and query layers.

use thiserror::Error;

/// Result type alias for poptrends operations.
pub type Result<T> = std::result::Result<T, PopulationError>;

/// Errors surfaced to callers of the query surface.
#[derive(Error, Debug)]
pub enum PopulationError {
    /// Malformed or out-of-range input (year bounds, start > end, empty code list).
    #[error("{0}")]
    Validation(String),

    /// Unknown country code, or no data for the requested year/countries.
    #[error("{0}")]
    NotFound(String),

    /// Dataset or reference data could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Unexpected failure while computing a response.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PopulationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// HTTP-equivalent status code for this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Load(_) | Self::Internal(_) => 500,
        }
    }
}

/// Failures while reading the dataset file or the reference configuration.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid reference data: {0}")]
    Reference(#[from] serde_yaml::Error),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
