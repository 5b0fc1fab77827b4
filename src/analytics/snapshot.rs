//! Dashboard snapshot for one year: totals, population distribution, top movers and
//! regional rollups over every non-aggregate country with a value for that year.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::analytics::ranking::{top_by, TopCountry, TOP_N};
use crate::analytics::{percent_change, round2};
use crate::data::{CountryRecord, Dataset, RegionDefinition};
use crate::error::{PopulationError, Result};

/// Fixed population ranges as (label, inclusive lower bound, exclusive upper bound).
const DISTRIBUTION_RANGES: [(&str, f64, Option<f64>); 6] = [
    ("<1M", 0.0, Some(1e6)),
    ("1M-10M", 1e6, Some(10e6)),
    ("10M-50M", 10e6, Some(50e6)),
    ("50M-100M", 50e6, Some(100e6)),
    ("100M-500M", 100e6, Some(500e6)),
    (">500M", 500e6, None),
];

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionBucket {
    pub label: &'static str,
    pub lower: f64,
    /// `None` for the open-ended top bucket.
    pub upper: Option<f64>,
    pub countries: Vec<String>,
}

impl DistributionBucket {
    pub fn count(&self) -> usize {
        self.countries.len()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.map_or(true, |upper| value < upper)
    }
}

/// Countries binned into [`DISTRIBUTION_RANGES`].
///
/// Serialises as `{ ranges, counts, countries_in_range }` with labels in bucket order.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationDistribution {
    buckets: Vec<DistributionBucket>,
}

impl PopulationDistribution {
    fn empty() -> Self {
        Self {
            buckets: DISTRIBUTION_RANGES
                .iter()
                .map(|&(label, lower, upper)| DistributionBucket {
                    label,
                    lower,
                    upper,
                    countries: Vec::new(),
                })
                .collect(),
        }
    }

    fn place(&mut self, name: &str, value: f64) {
        if let Some(bucket) = self.buckets.iter_mut().find(|b| b.contains(value)) {
            bucket.countries.push(name.to_string());
        }
    }

    pub fn buckets(&self) -> &[DistributionBucket] {
        &self.buckets
    }

    /// Number of countries across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(DistributionBucket::count).sum()
    }
}

/// Label -> member names, in bucket order.
struct CountriesInRange<'a>(&'a [DistributionBucket]);

impl Serialize for CountriesInRange<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for bucket in self.0 {
            map.serialize_entry(bucket.label, &bucket.countries)?;
        }
        map.end()
    }
}

impl Serialize for PopulationDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let ranges: Vec<&str> = self.buckets.iter().map(|b| b.label).collect();
        let counts: Vec<usize> = self.buckets.iter().map(DistributionBucket::count).collect();

        let mut state = serializer.serialize_struct("PopulationDistribution", 3)?;
        state.serialize_field("ranges", &ranges)?;
        state.serialize_field("counts", &counts)?;
        state.serialize_field("countries_in_range", &CountriesInRange(&self.buckets))?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalData {
    pub region_name: String,
    pub total_population: f64,
    pub countries: Vec<String>,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsResponse {
    pub year: i32,
    pub total_population: f64,
    pub average_growth_rate: f64,
    pub population_distribution: PopulationDistribution,
    pub top_growing_countries: Vec<TopCountry>,
    pub top_populated_countries: Vec<TopCountry>,
    pub regional_data: Vec<RegionalData>,
}

/// A country with a value for the snapshot year.
struct Candidate<'a> {
    record: &'a CountryRecord,
    value: f64,
    previous: Option<f64>,
    growth: Option<f64>,
}

impl Candidate<'_> {
    fn to_top_country(&self) -> TopCountry {
        TopCountry {
            country_name: self.record.name.clone(),
            country_code: self.record.code.clone(),
            value: self.value,
            growth_rate: self.growth.map(round2),
        }
    }
}

pub fn analytics_snapshot(
    dataset: &Dataset,
    regions: &[RegionDefinition],
    year: i32,
) -> Result<AnalyticsResponse> {
    let candidates: Vec<Candidate<'_>> = dataset
        .countries()
        .filter_map(|record| {
            let value = record.population(year)?;
            let previous = record.population(year - 1);
            Some(Candidate {
                record,
                value,
                previous,
                growth: previous.and_then(|p| percent_change(value, p)),
            })
        })
        .collect();

    if candidates.is_empty() {
        return Err(PopulationError::not_found(format!(
            "No analytics data found for year {year}"
        )));
    }

    let total_population: f64 = candidates.iter().map(|c| c.value).sum();
    let previous_total: f64 = candidates.iter().filter_map(|c| c.previous).sum();
    let average_growth_rate = growth_or_zero(total_population, previous_total);

    let mut population_distribution = PopulationDistribution::empty();
    for candidate in &candidates {
        population_distribution.place(&candidate.record.name, candidate.value);
    }

    let top_growing_countries = top_by(&candidates, TOP_N, |c| c.growth)
        .into_iter()
        .map(Candidate::to_top_country)
        .collect();
    let top_populated_countries = top_by(&candidates, TOP_N, |c| Some(c.value))
        .into_iter()
        .map(Candidate::to_top_country)
        .collect();

    let regional_data = regions
        .iter()
        .filter_map(|region| regional_rollup(dataset, region, year))
        .collect();

    debug!(year, countries = candidates.len(), "computed analytics snapshot");

    Ok(AnalyticsResponse {
        year,
        total_population,
        average_growth_rate,
        population_distribution,
        top_growing_countries,
        top_populated_countries,
        regional_data,
    })
}

/// Sum the region's members present in the dataset; `None` when none are present.
fn regional_rollup(
    dataset: &Dataset,
    region: &RegionDefinition,
    year: i32,
) -> Option<RegionalData> {
    let members: Vec<&CountryRecord> = dataset
        .countries()
        .filter(|record| region.contains(&record.code))
        .collect();
    if members.is_empty() {
        return None;
    }

    let total: f64 = members.iter().filter_map(|m| m.population(year)).sum();
    let previous: f64 = members.iter().filter_map(|m| m.population(year - 1)).sum();

    Some(RegionalData {
        region_name: region.name.clone(),
        total_population: total,
        countries: members.iter().map(|m| m.name.clone()).collect(),
        growth_rate: growth_or_zero(total, previous),
    })
}

fn growth_or_zero(current: f64, previous: f64) -> f64 {
    percent_change(current, previous).map_or(0.0, round2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_half_open() {
        let distribution = PopulationDistribution::empty();
        let buckets = distribution.buckets();
        assert!(buckets[0].contains(0.0));
        assert!(!buckets[0].contains(1e6));
        assert!(buckets[1].contains(1e6));
        assert!(buckets[5].contains(500e6));
        assert!(buckets[5].contains(2e9));
    }

    #[test]
    fn distribution_serialises_in_bucket_order() {
        let mut distribution = PopulationDistribution::empty();
        distribution.place("Tiny", 10.0);
        distribution.place("Huge", 1.4e9);

        let json = serde_json::to_value(&distribution).expect("distribution should serialise");
        assert_eq!(
            json["ranges"],
            serde_json::json!(["<1M", "1M-10M", "10M-50M", "50M-100M", "100M-500M", ">500M"])
        );
        assert_eq!(json["counts"], serde_json::json!([1, 0, 0, 0, 0, 1]));
        assert_eq!(json["countries_in_range"][">500M"], serde_json::json!(["Huge"]));
        assert_eq!(json["countries_in_range"]["<1M"], serde_json::json!(["Tiny"]));
    }

    #[test]
    fn zero_prior_total_yields_zero_growth() {
        assert_eq!(growth_or_zero(100.0, 0.0), 0.0);
        assert_eq!(growth_or_zero(110.0, 100.0), 10.0);
    }
}
