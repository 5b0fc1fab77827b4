use serde::Serialize;

use crate::analytics::{percent_change, round2};
use crate::data::{CountryRecord, FIRST_YEAR};
use crate::error::{PopulationError, Result};

/// Change over one lookback window; both fields are `None` when the window cannot be computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GrowthMetrics {
    pub absolute: Option<i64>,
    pub percentage: Option<f64>,
}

impl GrowthMetrics {
    pub const fn is_empty(&self) -> bool {
        self.absolute.is_none() && self.percentage.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountryGrowth {
    pub one_year: GrowthMetrics,
    pub three_year: GrowthMetrics,
    pub five_year: GrowthMetrics,
}

/// Growth of `record` into `year` over 1, 3 and 5 year windows.
pub fn growth_metrics(record: &CountryRecord, year: i32) -> Result<CountryGrowth> {
    let current = record.population(year).ok_or_else(|| {
        PopulationError::not_found(format!("No data available for year {year}"))
    })?;

    let window = |years_back: i32| window_metrics(record, current, year - years_back);

    Ok(CountryGrowth {
        one_year: window(1),
        three_year: window(3),
        five_year: window(5),
    })
}

fn window_metrics(record: &CountryRecord, current: f64, past_year: i32) -> GrowthMetrics {
    if past_year < FIRST_YEAR {
        return GrowthMetrics::default();
    }
    let Some(past) = record.population(past_year) else {
        return GrowthMetrics::default();
    };

    GrowthMetrics {
        absolute: Some((current - past).round() as i64),
        percentage: percent_change(current, past).map(round2),
    }
}
