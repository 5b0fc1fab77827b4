use serde::Serialize;

use crate::analytics::{percent_change, round2};
use crate::data::{CountryRecord, FIRST_YEAR, LATEST_YEAR};
use crate::error::{PopulationError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub population: f64,
    pub growth_rate: Option<f64>,
}

/// Yearly population for `record` over `[start, end]` (defaults 1960..=2022).
///
/// Years with no value are skipped. A point's growth rate is relative to the
/// preceding calendar year and is `None` for the first year of the range or when
/// that preceding value is missing or zero.
pub fn population_trends(
    record: &CountryRecord,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> Result<Vec<TrendPoint>> {
    let start = start_year.unwrap_or(FIRST_YEAR);
    let end = end_year.unwrap_or(LATEST_YEAR);
    if start > end {
        return Err(PopulationError::validation(
            "Start year must be less than or equal to end year",
        ));
    }

    let trends = (start..=end)
        .filter_map(|year| {
            let population = record.population(year)?;
            let growth_rate = if year > start {
                record
                    .population(year - 1)
                    .and_then(|previous| percent_change(population, previous))
                    .map(round2)
            } else {
                None
            };
            Some(TrendPoint {
                year,
                population,
                growth_rate,
            })
        })
        .collect();

    Ok(trends)
}
