//! In-memory sale store for tests and development.

use std::sync::RwLock;

use async_trait::async_trait;

use ventra_core::SaleId;
use ventra_sales::Sale;

use crate::{SaleStore, error::StoreError};

/// In-memory store. Keeps insertion order so that records sharing a date
/// list in the order they were recorded.
#[derive(Debug, Default)]
pub struct InMemorySaleStore {
    inner: RwLock<Vec<Sale>>,
}

impl InMemorySaleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("store lock poisoned".to_string())
}

#[async_trait]
impl SaleStore for InMemorySaleStore {
    async fn insert(&self, sale: Sale) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        rows.push(sale);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Sale>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        let mut out = rows.clone();
        // Stable sort: equal dates keep insertion order.
        out.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(out)
    }

    async fn get(&self, id: SaleId) -> Result<Option<Sale>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|s| s.id == id).cloned())
    }

    async fn delete(&self, id: SaleId) -> Result<bool, StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
