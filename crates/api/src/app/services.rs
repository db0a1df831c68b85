//! Store selection and the service layer between HTTP handlers and the
//! domain crates.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use ventra_core::{DomainError, SaleId};
use ventra_sales::{
    CategorySet, MonthMatch, MonthScope, Sale, forecast, metrics,
};
use ventra_store::{InMemorySaleStore, PostgresSaleStore, SaleStore, StoreError};

use crate::app::dto::{
    CategoriesResponse, CreateSaleRequest, DashboardResponse, ForecastResponse, GoalResponse,
    SeriesResponse,
};
use crate::config::Config;

/// Failures surfaced by the service layer, mapped onto HTTP in `errors.rs`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidId(String),

    #[error("sale not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::InvalidId(msg) => Self::InvalidId(msg),
            DomainError::NotFound => Self::NotFound,
        }
    }
}

/// Everything handlers need, behind one `Extension`.
pub struct AppServices {
    store: Arc<dyn SaleStore>,
    categories: CategorySet,
    monthly_goal: f64,
    month_match: MonthMatch,
}

impl AppServices {
    /// Wire the store from config: `DATABASE_URL` selects Postgres, its
    /// absence the in-memory store (dev/test).
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn SaleStore> = match &config.database_url {
            Some(url) => Arc::new(PostgresSaleStore::connect(url).await?),
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory store");
                Arc::new(InMemorySaleStore::new())
            }
        };
        Ok(Self::new(store, config))
    }

    pub fn new(store: Arc<dyn SaleStore>, config: &Config) -> Self {
        Self {
            store,
            categories: config.categories.clone(),
            monthly_goal: config.monthly_goal,
            month_match: config.month_match,
        }
    }

    // ---- record operations ----

    pub async fn list_sales(&self) -> Result<Vec<Sale>, ServiceError> {
        Ok(self.store.list().await?)
    }

    /// Validate, assign an id, and persist. Validation failures never reach
    /// the store.
    pub async fn create_sale(&self, request: CreateSaleRequest) -> Result<Sale, ServiceError> {
        let draft = request.into_draft(&self.categories)?;
        let sale = draft.into_sale(SaleId::new());
        self.store.insert(sale.clone()).await?;
        tracing::info!(id = %sale.id, category = %sale.category, "sale recorded");
        Ok(sale)
    }

    pub async fn get_sale(&self, id: SaleId) -> Result<Sale, ServiceError> {
        self.store.get(id).await?.ok_or(ServiceError::NotFound)
    }

    /// Permanent, irreversible removal.
    pub async fn delete_sale(&self, id: SaleId) -> Result<(), ServiceError> {
        if self.store.delete(id).await? {
            tracing::info!(%id, "sale deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    /// Health probe result for `/health`.
    pub async fn database_status(&self) -> &'static str {
        match self.store.ping().await {
            Ok(()) => "connected",
            Err(_) => "disconnected",
        }
    }

    // ---- derived metrics (recomputed per request) ----

    pub async fn dashboard(&self, today: NaiveDate) -> Result<DashboardResponse, ServiceError> {
        let sales = self.store.list().await?;

        let totals = metrics::totals(&sales);
        let current = MonthScope::current(today, self.month_match);
        let previous = MonthScope::previous(today, self.month_match);
        let current_month_revenue = metrics::month_revenue(&sales, current);
        let last_month_revenue = metrics::month_revenue(&sales, previous);
        let rate = metrics::run_rate(
            current_month_revenue,
            today.day(),
            metrics::days_in_month(today),
        );

        Ok(DashboardResponse {
            totals,
            current_month_revenue,
            last_month_revenue,
            growth_rate: metrics::calculate_growth(current_month_revenue, last_month_revenue),
            average_daily_revenue: rate.average_daily_revenue,
            projected_monthly_revenue: rate.projected_monthly_revenue,
        })
    }

    pub async fn categories(&self) -> Result<CategoriesResponse, ServiceError> {
        let sales = self.store.list().await?;
        Ok(CategoriesResponse {
            categories: self.categories.defs().to_vec(),
            breakdown: metrics::category_breakdown(&sales),
        })
    }

    pub async fn series(&self) -> Result<SeriesResponse, ServiceError> {
        let sales = self.store.list().await?;
        Ok(SeriesResponse {
            points: metrics::daily_series(&sales),
        })
    }

    pub async fn forecast(&self, today: NaiveDate) -> Result<ForecastResponse, ServiceError> {
        let sales = self.store.list().await?;

        let current = MonthScope::current(today, self.month_match);
        let previous = MonthScope::previous(today, self.month_match);
        let current_month_revenue = metrics::month_revenue(&sales, current);
        let last_month_revenue = metrics::month_revenue(&sales, previous);
        let rate = metrics::run_rate(
            current_month_revenue,
            today.day(),
            metrics::days_in_month(today),
        );

        // The forecast view compares projected month-end against last
        // month and treats a zero baseline as 0%, unlike the dashboard's
        // 100% convention.
        let growth_rate = if last_month_revenue > 0.0 {
            (rate.projected_monthly_revenue - last_month_revenue) / last_month_revenue * 100.0
        } else {
            0.0
        };

        let series = metrics::daily_series(&sales);
        let points = forecast::forecast_next_days(&series, &mut rand::thread_rng());

        Ok(ForecastResponse {
            average_daily_revenue: rate.average_daily_revenue,
            projected_monthly_revenue: rate.projected_monthly_revenue,
            growth_rate,
            confidence: forecast::forecast_confidence(metrics::month_sale_count(&sales, current)),
            points,
        })
    }

    pub async fn goal(&self, today: NaiveDate) -> Result<GoalResponse, ServiceError> {
        let sales = self.store.list().await?;
        let current = MonthScope::current(today, self.month_match);
        let current_revenue = metrics::month_revenue(&sales, current);

        Ok(GoalResponse {
            goal: self.monthly_goal,
            current_revenue,
            progress: metrics::goal_progress(current_revenue, self.monthly_goal),
        })
    }
}
