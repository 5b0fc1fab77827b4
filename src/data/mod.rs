pub mod dataset;
pub mod reference;
pub mod registry;

pub use dataset::{
    CountryPopulation, CountryRecord, CountrySummary, Dataset, DEFAULT_DATASET_PATH, FIRST_YEAR,
    LAST_FILE_YEAR, LATEST_YEAR,
};
pub use reference::{load_reference_data, ReferenceData, RegionDefinition};
pub use registry::DataRegistry;
