//! Query functions behind the HTTP routes and the CLI: input validation, then a
//! dataset lookup and the matching analytics call.

use serde::Serialize;

use crate::analytics::{
    analytics_snapshot, growth_metrics, population_trends, AnalyticsResponse, CountryGrowth,
    TrendPoint,
};
use crate::data::{CountryPopulation, CountrySummary, DataRegistry, FIRST_YEAR, LATEST_YEAR};
use crate::error::{PopulationError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub fn health() -> HealthStatus {
    HealthStatus {
        status: "healthy",
        service: "poptrends",
        version: env!("CARGO_PKG_VERSION"),
    }
}

pub fn list_countries(registry: &DataRegistry) -> Vec<CountrySummary> {
    registry.dataset().list_countries()
}

/// Population series for a comma-separated list of codes.
pub fn population_data(registry: &DataRegistry, codes: &str) -> Result<Vec<CountryPopulation>> {
    let codes = parse_codes(codes)?;
    registry.dataset().population_data(&codes)
}

pub fn country_growth(registry: &DataRegistry, code: &str, year: i32) -> Result<CountryGrowth> {
    let code = require_code(code)?;
    require_year_in_range(year)?;
    let record = registry.dataset().row_for(code)?;
    growth_metrics(record, year)
}

pub fn trends(
    registry: &DataRegistry,
    code: &str,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> Result<Vec<TrendPoint>> {
    let code = require_code(code)?;
    for year in [start_year, end_year].into_iter().flatten() {
        require_year_in_range(year)?;
    }
    let record = registry.dataset().row_for(code)?;
    let points = population_trends(record, start_year, end_year)?;
    if points.is_empty() {
        return Err(PopulationError::not_found(format!(
            "No population trends found for country code {code}"
        )));
    }
    Ok(points)
}

pub fn dashboard(registry: &DataRegistry, year: Option<i32>) -> Result<AnalyticsResponse> {
    let year = year.unwrap_or(LATEST_YEAR);
    require_year_in_range(year)?;
    analytics_snapshot(registry.dataset(), registry.regions(), year)
}

fn require_code(code: &str) -> Result<&str> {
    let code = code.trim();
    if code.is_empty() {
        return Err(PopulationError::validation("Country code cannot be empty"));
    }
    Ok(code)
}

fn require_year_in_range(year: i32) -> Result<()> {
    if !(FIRST_YEAR..=LATEST_YEAR).contains(&year) {
        return Err(PopulationError::validation(format!(
            "Year must be between {FIRST_YEAR} and {LATEST_YEAR}"
        )));
    }
    Ok(())
}

fn parse_codes(raw: &str) -> Result<Vec<&str>> {
    if raw.trim().is_empty() {
        return Err(PopulationError::validation("Country codes cannot be empty"));
    }
    let codes: Vec<&str> = raw.split(',').map(str::trim).collect();
    if codes.iter().any(|code| code.is_empty()) {
        return Err(PopulationError::validation(format!(
            "Invalid country codes: '{raw}'"
        )));
    }
    Ok(codes)
}
