//! Startup-loaded data cache shared by every request.
//! Load once, pass via Arc to handlers; nothing here is mutated after load.

use std::path::Path;
use std::sync::Arc;

use crate::data::dataset::Dataset;
use crate::data::reference::{load_reference_data, ReferenceData, RegionDefinition};
use crate::error::LoadError;

#[derive(Debug)]
pub struct DataRegistry {
    dataset: Dataset,
    reference: ReferenceData,
}

impl DataRegistry {
    pub fn new(dataset: Dataset, reference: ReferenceData) -> Self {
        Self { dataset, reference }
    }

    /// Load reference data (file or embedded default), then the dataset using its denylist.
    pub fn load(
        dataset_path: impl AsRef<Path>,
        reference_path: Option<&Path>,
    ) -> Result<Arc<DataRegistry>, LoadError> {
        let reference = load_reference_data(reference_path)?;
        let dataset = Dataset::load(dataset_path, &reference.aggregate_codes)?;
        Ok(Arc::new(Self::new(dataset, reference)))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn regions(&self) -> &[RegionDefinition] {
        &self.reference.regions
    }
}
