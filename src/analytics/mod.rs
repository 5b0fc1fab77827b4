//! Pure analytics over the read-only dataset: trends, growth windows and snapshots.

pub mod growth;
pub mod ranking;
pub mod snapshot;
pub mod trends;

pub use growth::{growth_metrics, CountryGrowth, GrowthMetrics};
pub use ranking::{top_by, TopCountry, TOP_N};
pub use snapshot::{
    analytics_snapshot, AnalyticsResponse, DistributionBucket, PopulationDistribution,
    RegionalData,
};
pub use trends::{population_trends, TrendPoint};

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change from `previous` to `current`; `None` when the base is zero.
pub(crate) fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}
