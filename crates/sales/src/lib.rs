//! `ventra-sales` — sale records and the metrics engine.
//!
//! Everything here is pure: functions take slices of [`Sale`] plus explicit
//! dates and RNGs and return derived values. I/O lives in `ventra-store`
//! and `ventra-api`.

pub mod category;
pub mod forecast;
pub mod metrics;
pub mod sale;

pub use category::{CategoryDef, CategorySet};
pub use forecast::{FORECAST_HORIZON_DAYS, ForecastPoint, forecast_confidence, forecast_next_days};
pub use metrics::{DailyPoint, GoalProgress, MonthMatch, MonthScope, RunRate, Totals};
pub use sale::{Sale, SaleDraft};
