//! Pure aggregation over sale records.
//!
//! Every function here takes an in-memory slice of [`Sale`] plus explicit
//! dates and returns derived figures; nothing reads the clock or performs
//! I/O. Callers recompute on every read; there is no caching layer.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::sale::Sale;

/// Revenue, cost and profit sums over a set of sales.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

pub fn totals(sales: &[Sale]) -> Totals {
    let revenue: f64 = sales.iter().map(|s| s.price).sum();
    let cost: f64 = sales.iter().map(|s| s.cost).sum();
    Totals {
        revenue,
        cost,
        profit: revenue - cost,
    }
}

pub fn total_revenue(sales: &[Sale]) -> f64 {
    sales.iter().map(|s| s.price).sum()
}

/// How month windows treat the year component.
///
/// `MonthOnly` compares the calendar month index only, so a March 2023
/// sale counts toward "current month" in March 2025. It is the default;
/// `MonthAndYear` restricts the window to one actual calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthMatch {
    #[default]
    MonthOnly,
    MonthAndYear,
}

/// A calendar-month window over sale dates.
///
/// The month index is signed: [`MonthScope::previous`] in
/// January produces index -1, which matches no sale under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthScope {
    month0: i32,
    year: i32,
    matching: MonthMatch,
}

impl MonthScope {
    /// The month `today` falls in.
    pub fn current(today: NaiveDate, matching: MonthMatch) -> Self {
        Self {
            month0: today.month0() as i32,
            year: today.year(),
            matching,
        }
    }

    /// The month before `today`'s. The index does not wrap: in January it
    /// is -1 and the scope matches nothing.
    pub fn previous(today: NaiveDate, matching: MonthMatch) -> Self {
        Self {
            month0: today.month0() as i32 - 1,
            year: today.year(),
            matching,
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        if date.month0() as i32 != self.month0 {
            return false;
        }
        match self.matching {
            MonthMatch::MonthOnly => true,
            MonthMatch::MonthAndYear => date.year() == self.year,
        }
    }
}

/// Revenue over the sales falling inside `scope`.
pub fn month_revenue(sales: &[Sale], scope: MonthScope) -> f64 {
    sales
        .iter()
        .filter(|s| scope.matches(s.date))
        .map(|s| s.price)
        .sum()
}

/// Number of sales falling inside `scope`.
pub fn month_sale_count(sales: &[Sale], scope: MonthScope) -> usize {
    sales.iter().filter(|s| scope.matches(s.date)).count()
}

/// Percentage change between two revenue figures.
///
/// A zero baseline is defined as 100% growth, whatever `current` is,
/// including 0 and negative values. Period-over-period comparisons rely on
/// this convention.
pub fn calculate_growth(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 100.0;
    }
    (current - previous) / previous * 100.0
}

/// Linear month-end projection from revenue observed so far.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRate {
    pub average_daily_revenue: f64,
    pub projected_monthly_revenue: f64,
}

/// Extrapolate month-end revenue: `month_revenue / day_of_month` scaled to
/// the month's length. `day_of_month` is 1-based; 0 yields a zero rate.
pub fn run_rate(month_revenue: f64, day_of_month: u32, days_in_month: u32) -> RunRate {
    let average_daily_revenue = if day_of_month > 0 {
        month_revenue / f64::from(day_of_month)
    } else {
        0.0
    };
    RunRate {
        average_daily_revenue,
        projected_monthly_revenue: average_daily_revenue * f64::from(days_in_month),
    }
}

/// Number of days in `date`'s month, leap-year aware.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    // The first of the following month always exists; its predecessor is
    // the last day of `date`'s month.
    first_of_next
        .and_then(|d| d.pred_opt())
        .map_or(31, |d| d.day())
}

/// Revenue per category. Categories with no sales are absent from the map.
pub fn category_breakdown(sales: &[Sale]) -> BTreeMap<String, f64> {
    let mut by_category = BTreeMap::new();
    for sale in sales {
        *by_category.entry(sale.category.clone()).or_insert(0.0) += sale.price;
    }
    by_category
}

/// One day of aggregated revenue and profit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub revenue: f64,
    pub profit: f64,
}

/// Group sales by exact date, ascending. Input order is irrelevant; the
/// output feeds time-series charts and must always be sorted.
pub fn daily_series(sales: &[Sale]) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();
    for sale in sales {
        let point = by_date.entry(sale.date).or_insert(DailyPoint {
            date: sale.date,
            revenue: 0.0,
            profit: 0.0,
        });
        point.revenue += sale.price;
        point.profit += sale.margin();
    }
    by_date.into_values().collect()
}

/// Progress toward a revenue goal, clamped to 100%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub percent: f64,
    pub is_over_goal: bool,
    pub remaining: f64,
}

pub fn goal_progress(current_revenue: f64, goal: f64) -> GoalProgress {
    GoalProgress {
        percent: (current_revenue / goal * 100.0).min(100.0),
        is_over_goal: current_revenue >= goal,
        remaining: (goal - current_revenue).max(0.0),
    }
}
