use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ventra_core::{DomainError, SaleId};

use crate::category::CategorySet;

/// One recorded sale transaction.
///
/// Immutable once created; the only lifecycle transition is deletion.
/// Serializes to the wire shape
/// `{id, date, productName, category, price, cost}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub date: NaiveDate,
    pub product_name: String,
    pub category: String,
    /// Revenue of this transaction. Always >= 0.
    pub price: f64,
    /// Cost of this transaction. Always >= 0; 0 when not recorded.
    pub cost: f64,
}

impl Sale {
    /// Margin of this single sale. May be negative; a sale can record a loss.
    pub fn margin(&self) -> f64 {
        self.price - self.cost
    }
}

/// Validated input for a new sale, before an id is assigned.
///
/// Constructing a draft is the domain boundary: a value that fails here is
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub date: NaiveDate,
    pub product_name: String,
    pub category: String,
    pub price: f64,
    pub cost: f64,
}

impl SaleDraft {
    pub fn new(
        date: NaiveDate,
        product_name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        cost: f64,
        categories: &CategorySet,
    ) -> Result<Self, DomainError> {
        let product_name = product_name.into().trim().to_string();
        if product_name.is_empty() {
            return Err(DomainError::validation("productName must not be empty"));
        }

        let category = category.into();
        if !categories.contains(&category) {
            return Err(DomainError::validation(format!(
                "unknown category: {category}"
            )));
        }

        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::validation(
                "price must be a non-negative number",
            ));
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(DomainError::validation(
                "cost must be a non-negative number",
            ));
        }

        Ok(Self {
            date,
            product_name,
            category,
            price,
            cost,
        })
    }

    /// Promote the draft to a persistable record under the given id.
    pub fn into_sale(self, id: SaleId) -> Sale {
        Sale {
            id,
            date: self.date,
            product_name: self.product_name,
            category: self.category,
            price: self.price,
            cost: self.cost,
        }
    }
}
