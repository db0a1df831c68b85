//! `ventra-store` — persistence for sale records.
//!
//! The service layer talks to [`SaleStore`]; implementations are the
//! in-memory store (dev/test) and the Postgres store. Both expose the same
//! four record operations plus a health probe.

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::StoreError;
pub use memory::InMemorySaleStore;
pub use postgres::PostgresSaleStore;

use async_trait::async_trait;

use ventra_core::SaleId;
use ventra_sales::Sale;

/// Persistent collection of sale records.
///
/// There is no update operation: records are immutable after insertion
/// and only ever removed whole.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Insert a new record. The caller has already assigned the id.
    async fn insert(&self, sale: Sale) -> Result<(), StoreError>;

    /// All records, newest date first. Records sharing a date keep their
    /// insertion order.
    async fn list(&self) -> Result<Vec<Sale>, StoreError>;

    async fn get(&self, id: SaleId) -> Result<Option<Sale>, StoreError>;

    /// Remove a record permanently. Returns `false` when no record had
    /// that id.
    async fn delete(&self, id: SaleId) -> Result<bool, StoreError>;

    /// Cheap connectivity probe for health reporting.
    async fn ping(&self) -> Result<(), StoreError>;
}
