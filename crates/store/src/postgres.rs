//! Postgres-backed sale store.
//!
//! Queries are runtime-checked (`sqlx::query` + `try_get`); the schema is
//! created on startup if missing. The pool is built once when the process
//! starts, so connectivity problems surface per-request as [`StoreError`]
//! rather than at first use.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use ventra_core::SaleId;
use ventra_sales::Sale;

use crate::{SaleStore, error::StoreError};

/// Postgres store over a single `sales` table.
pub struct PostgresSaleStore {
    pool: PgPool,
}

impl PostgresSaleStore {
    /// Connect and make sure the schema exists. Called once at startup.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        tracing::info!("connected to postgres sale store");
        Ok(store)
    }

    /// Wrap an existing pool (tests, shared pools).
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        // created_at is a storage detail: it breaks ties when ordering
        // records that share a date and never reaches the wire entity.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sales (
                id UUID PRIMARY KEY,
                date DATE NOT NULL,
                product_name TEXT NOT NULL,
                category TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL,
                cost DOUBLE PRECISION NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn row_to_sale(row: &PgRow) -> Result<Sale, StoreError> {
    Ok(Sale {
        id: SaleId::from_uuid(row.try_get("id")?),
        date: row.try_get("date")?,
        product_name: row.try_get("product_name")?,
        category: row.try_get("category")?,
        price: row.try_get("price")?,
        cost: row.try_get("cost")?,
    })
}

#[async_trait]
impl SaleStore for PostgresSaleStore {
    async fn insert(&self, sale: Sale) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO sales (id, date, product_name, category, price, cost)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(*sale.id.as_uuid())
        .bind(sale.date)
        .bind(&sale.product_name)
        .bind(&sale.category)
        .bind(sale.price)
        .bind(sale.cost)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Sale>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, product_name, category, price, cost
            FROM sales
            ORDER BY date DESC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_sale).collect()
    }

    async fn get(&self, id: SaleId) -> Result<Option<Sale>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, date, product_name, category, price, cost
            FROM sales
            WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_sale).transpose()
    }

    async fn delete(&self, id: SaleId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
