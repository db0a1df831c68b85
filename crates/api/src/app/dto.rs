use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ventra_core::DomainError;
use ventra_sales::{CategoryDef, CategorySet, DailyPoint, ForecastPoint, GoalProgress, SaleDraft, Totals};

// -------------------------
// Request DTOs
// -------------------------

/// Money fields accept a JSON number or a numeric string; form clients
/// send both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MoneyInput {
    Number(f64),
    Text(String),
}

impl MoneyInput {
    fn parse(&self, field: &'static str) -> Result<f64, DomainError> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                DomainError::validation(format!("{field} must be a number"))
            })?,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::validation(format!(
                "{field} must be a non-negative number"
            )));
        }
        Ok(value)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub date: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub price: Option<MoneyInput>,
    pub cost: Option<MoneyInput>,
}

impl CreateSaleRequest {
    /// Check required fields and value rules. Nothing is persisted unless
    /// this succeeds.
    pub fn into_draft(self, categories: &CategorySet) -> Result<SaleDraft, DomainError> {
        let Self {
            date,
            product_name,
            category,
            price,
            cost,
        } = self;

        let (Some(date), Some(product_name), Some(category), Some(price)) =
            (date, product_name, category, price)
        else {
            return Err(DomainError::validation("missing required fields"));
        };

        let date = date
            .parse::<NaiveDate>()
            .map_err(|_| DomainError::validation("date must be an ISO date (YYYY-MM-DD)"))?;
        let price = price.parse("price")?;
        let cost = cost.map(|c| c.parse("cost")).transpose()?.unwrap_or(0.0);

        SaleDraft::new(date, product_name, category, price, cost, categories)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub totals: Totals,
    pub current_month_revenue: f64,
    pub last_month_revenue: f64,
    /// Period-over-period growth, percent; 100 when last month was 0.
    pub growth_rate: f64,
    pub average_daily_revenue: f64,
    pub projected_monthly_revenue: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    /// Configured categories with display metadata.
    pub categories: Vec<CategoryDef>,
    /// Revenue per category key; silent categories are absent.
    pub breakdown: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub average_daily_revenue: f64,
    pub projected_monthly_revenue: f64,
    /// Projected month-end vs last month, percent; 0 when last month was 0.
    pub growth_rate: f64,
    pub confidence: u8,
    pub points: Vec<ForecastPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    pub points: Vec<DailyPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    pub goal: f64,
    pub current_revenue: f64,
    #[serde(flatten)]
    pub progress: GoalProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> CreateSaleRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn accepts_numeric_strings_for_money_fields() {
        let req = request(serde_json::json!({
            "date": "2024-03-01",
            "productName": "Cours Rust",
            "category": "Formation",
            "price": "149.90",
            "cost": "20",
        }));
        let draft = req.into_draft(&CategorySet::default()).unwrap();
        assert_eq!(draft.price, 149.90);
        assert_eq!(draft.cost, 20.0);
    }

    #[test]
    fn missing_date_is_a_validation_error() {
        let req = request(serde_json::json!({
            "productName": "Cours Rust",
            "category": "Formation",
            "price": 149.0,
        }));
        let err = req.into_draft(&CategorySet::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn omitted_cost_defaults_to_zero() {
        let req = request(serde_json::json!({
            "date": "2024-03-01",
            "productName": "Cours Rust",
            "category": "Formation",
            "price": 149.0,
        }));
        let draft = req.into_draft(&CategorySet::default()).unwrap();
        assert_eq!(draft.cost, 0.0);
    }

    #[test]
    fn unparsable_price_is_rejected() {
        let req = request(serde_json::json!({
            "date": "2024-03-01",
            "productName": "Cours Rust",
            "category": "Formation",
            "price": "not-a-number",
        }));
        assert!(req.into_draft(&CategorySet::default()).is_err());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let req = request(serde_json::json!({
            "date": "03/01/2024",
            "productName": "Cours Rust",
            "category": "Formation",
            "price": 149.0,
        }));
        assert!(req.into_draft(&CategorySet::default()).is_err());
    }
}
