//! Randomized 30-day revenue forecast.
//!
//! The projection is a flat daily average with per-day uniform variance,
//! not a statistical model. Randomness comes from the caller so tests can
//! seed it.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::Serialize;

use crate::metrics::DailyPoint;

/// Days projected past the last historical date.
pub const FORECAST_HORIZON_DAYS: i64 = 30;

/// One projected day of revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Average daily revenue over the historical series: total revenue divided
/// by the number of distinct dates with at least one sale, not calendar
/// days, so gaps between sales do not dilute the average.
pub fn average_daily_revenue(series: &[DailyPoint]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let total: f64 = series.iter().map(|p| p.revenue).sum();
    total / series.len() as f64
}

/// Project the next 30 calendar days after the last historical date.
///
/// Each point is the historical daily average scaled by an independent
/// uniform variance in `[0.85, 1.15)`. An empty series yields an empty
/// forecast.
pub fn forecast_next_days<R: Rng>(series: &[DailyPoint], rng: &mut R) -> Vec<ForecastPoint> {
    let Some(last) = series.last() else {
        return Vec::new();
    };
    let avg = average_daily_revenue(series);

    (1..=FORECAST_HORIZON_DAYS)
        .map(|offset| {
            let variance = rng.gen_range(0.85..1.15);
            ForecastPoint {
                date: last.date + Duration::days(offset),
                value: avg * variance,
            }
        })
        .collect()
}

/// Ad-hoc confidence score for the forecast: 60 base plus 2 per sale
/// observed in the current month, capped at 95.
pub fn forecast_confidence(current_month_sales: usize) -> u8 {
    (60 + 2 * current_month_sales).min(95) as u8
}
