//! HTTP application wiring (axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: store selection and the service layer handlers call into
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and response shapes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: Config) -> anyhow::Result<Router> {
    let services = Arc::new(services::AppServices::from_config(&config).await?);
    Ok(router_with(services))
}

/// Assemble the router around already-built services (tests inject an
/// in-memory store here).
pub fn router_with(services: Arc<services::AppServices>) -> Router {
    // The dashboard is a static browser app served from anywhere, so the
    // API answers any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)).layer(cors))
}
