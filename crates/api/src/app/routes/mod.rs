use axum::Router;

pub mod metrics;
pub mod sales;
pub mod system;

/// Router for everything except `/health`.
pub fn router() -> Router {
    Router::new()
        .nest("/sales", sales::router())
        .nest("/metrics", metrics::router())
}
