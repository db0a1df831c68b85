//! Runtime configuration.
//!
//! Loaded once at startup from environment variables; every variable has
//! a default so the binary runs with no configuration at all.

use std::env;

use ventra_sales::{CategoryDef, CategorySet, MonthMatch};

/// API process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on.
    pub port: u16,
    /// Postgres connection string; absent selects the in-memory store.
    pub database_url: Option<String>,
    /// Revenue goal for the current month.
    pub monthly_goal: f64,
    /// Closed set of sale categories plus display metadata.
    pub categories: CategorySet,
    /// Whether month windows compare the year as well as the month index.
    pub month_match: MonthMatch,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `PORT`: listen port (default 5000)
    /// - `DATABASE_URL`: Postgres connection string (unset: in-memory)
    /// - `MONTHLY_GOAL`: positive revenue goal (default 5000)
    /// - `CATEGORIES`: JSON array of `{key, label, color}` (default set)
    /// - `MONTH_MATCH`: `month-only` (default) or `month-and-year`
    pub fn load() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid("PORT", e.to_string()))?;

        let database_url = env::var("DATABASE_URL").ok();

        let monthly_goal = env::var("MONTHLY_GOAL")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<f64>()
            .map_err(|e| ConfigError::Invalid("MONTHLY_GOAL", e.to_string()))?;
        if !monthly_goal.is_finite() || monthly_goal <= 0.0 {
            return Err(ConfigError::Invalid(
                "MONTHLY_GOAL",
                "must be a positive number".to_string(),
            ));
        }

        let categories = match env::var("CATEGORIES") {
            Ok(json) => {
                let defs: Vec<CategoryDef> = serde_json::from_str(&json)
                    .map_err(|e| ConfigError::Invalid("CATEGORIES", e.to_string()))?;
                CategorySet::new(defs)
                    .map_err(|e| ConfigError::Invalid("CATEGORIES", e.to_string()))?
            }
            Err(_) => CategorySet::default(),
        };

        let month_match = match env::var("MONTH_MATCH").as_deref() {
            Ok("month-only") | Err(_) => MonthMatch::MonthOnly,
            Ok("month-and-year") => MonthMatch::MonthAndYear,
            Ok(other) => {
                return Err(ConfigError::Invalid("MONTH_MATCH", other.to_string()));
            }
        };

        Ok(Self {
            port,
            database_url,
            monthly_goal,
            categories,
            month_match,
        })
    }
}

impl Default for Config {
    /// In-memory defaults (tests and local development).
    fn default() -> Self {
        Self {
            port: 5000,
            database_url: None,
            monthly_goal: 5000.0,
            categories: CategorySet::default(),
            month_match: MonthMatch::MonthOnly,
        }
    }
}
