//! Store error model.

use thiserror::Error;

/// Failure talking to the backing store.
///
/// Terminal for the request that hit it; the process keeps serving and the
/// next request gets a fresh attempt.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A query was sent but failed.
    #[error("store query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::Unavailable(err.to_string())
            }
            other => Self::Query(other.to_string()),
        }
    }
}
