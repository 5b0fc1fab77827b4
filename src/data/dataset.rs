//! In-memory country population table loaded once from a tab-separated file.
//!
//! The file has one header row with `Country Name`, `Country Code` and one column
//! per year (`"1960"` .. `"2023"`). Cells that are not finite, non-negative numbers
//! are treated as missing; missing years are absent from a record, never zero.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{LoadError, PopulationError, Result};

/// Earliest year covered by the dataset.
pub const FIRST_YEAR: i32 = 1960;
/// Latest year with complete data; upper bound for analytics queries.
pub const LATEST_YEAR: i32 = 2022;
/// Latest year column read from the file.
pub const LAST_FILE_YEAR: i32 = 2023;

pub const DEFAULT_DATASET_PATH: &str = "country_development.tsv";

const NAME_COLUMN: &str = "Country Name";
const CODE_COLUMN: &str = "Country Code";

/// One row of the table: a country (or aggregate) and its yearly population.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    pub name: String,
    pub code: String,
    population: BTreeMap<i32, f64>,
}

impl CountryRecord {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        population: impl IntoIterator<Item = (i32, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            population: population
                .into_iter()
                .filter(|(_, value)| is_valid_population(*value))
                .collect(),
        }
    }

    /// Population for `year`, or `None` when the value is missing.
    pub fn population(&self, year: i32) -> Option<f64> {
        self.population.get(&year).copied()
    }

    /// Known (year, population) pairs in ascending year order.
    pub fn years(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.population.iter().map(|(year, value)| (*year, *value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySummary {
    pub country_name: String,
    pub country_code: String,
}

/// Per-country year -> population mapping; missing years are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryPopulation {
    pub country_name: String,
    pub country_code: String,
    pub population: BTreeMap<String, f64>,
}

/// Read-only population table plus the aggregate pseudo-codes excluded from analytics.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CountryRecord>,
    by_code: HashMap<String, usize>,
    aggregate_codes: HashSet<String>,
}

impl Dataset {
    pub fn load(
        path: impl AsRef<Path>,
        aggregate_codes: &[String],
    ) -> std::result::Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| LoadError::io(path.display().to_string(), err))?;
        let dataset = Self::from_reader(file, aggregate_codes)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            "loaded population dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        aggregate_codes: &[String],
    ) -> std::result::Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        let name_idx = column(NAME_COLUMN)?;
        let code_idx = column(CODE_COLUMN)?;

        let year_columns: Vec<(usize, i32)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| {
                header
                    .parse::<i32>()
                    .ok()
                    .filter(|year| (FIRST_YEAR..=LAST_FILE_YEAR).contains(year))
                    .map(|year| (idx, year))
            })
            .collect();
        debug!(year_columns = year_columns.len(), "parsed dataset header");

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let field = |idx: usize| row.get(idx).unwrap_or("").trim();
            let population = year_columns
                .iter()
                .filter_map(|&(idx, year)| parse_population(field(idx)).map(|value| (year, value)));
            records.push(CountryRecord::new(field(name_idx), field(code_idx), population));
        }

        Ok(Self::from_records(records, aggregate_codes))
    }

    pub fn from_records(records: Vec<CountryRecord>, aggregate_codes: &[String]) -> Self {
        let mut by_code = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if by_code.contains_key(&record.code) {
                warn!(code = %record.code, "duplicate country code; keeping first row");
                continue;
            }
            by_code.insert(record.code.clone(), idx);
        }

        Self {
            records,
            by_code,
            aggregate_codes: aggregate_codes.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows in file order, aggregates included.
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn is_aggregate(&self, code: &str) -> bool {
        self.aggregate_codes.contains(code)
    }

    /// Rows eligible for per-country analytics (aggregates excluded), in file order.
    pub fn countries(&self) -> impl Iterator<Item = &CountryRecord> + '_ {
        self.records.iter().filter(|r| !self.is_aggregate(&r.code))
    }

    /// Known countries as (name, code), de-duplicated by code, file order preserved.
    pub fn list_countries(&self) -> Vec<CountrySummary> {
        let mut seen = HashSet::new();
        self.countries()
            .filter(|r| !r.name.is_empty() && !r.code.is_empty())
            .filter(|r| seen.insert(r.code.as_str()))
            .map(|r| CountrySummary {
                country_name: r.name.clone(),
                country_code: r.code.clone(),
            })
            .collect()
    }

    pub fn row_for(&self, code: &str) -> Result<&CountryRecord> {
        self.by_code
            .get(code)
            .map(|&idx| &self.records[idx])
            .ok_or_else(|| PopulationError::not_found(format!("Country code {code} not found")))
    }

    /// Rows whose code is in `codes`, in file order.
    ///
    /// Unknown codes are skipped; only a request where nothing matches fails.
    /// Callers that need every code present must compare the result length themselves.
    pub fn rows_for<S: AsRef<str>>(&self, codes: &[S]) -> Result<Vec<&CountryRecord>> {
        let wanted: HashSet<&str> = codes.iter().map(AsRef::as_ref).collect();
        let rows: Vec<&CountryRecord> = self
            .records
            .iter()
            .filter(|r| wanted.contains(r.code.as_str()))
            .collect();
        if rows.is_empty() {
            return Err(PopulationError::not_found(
                "No data found for specified countries",
            ));
        }
        Ok(rows)
    }

    pub fn population_data<S: AsRef<str>>(&self, codes: &[S]) -> Result<Vec<CountryPopulation>> {
        let rows = self.rows_for(codes)?;
        Ok(rows
            .into_iter()
            .map(|r| CountryPopulation {
                country_name: r.name.clone(),
                country_code: r.code.clone(),
                population: r.years().map(|(year, value)| (year.to_string(), value)).collect(),
            })
            .collect())
    }
}

fn is_valid_population(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn parse_population(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| is_valid_population(*v))
}
