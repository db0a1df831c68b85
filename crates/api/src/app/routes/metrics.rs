//! Derived-metrics read endpoints.
//!
//! Each handler fetches the full record set and recomputes; there is no
//! cache to invalidate. "Today" is taken from the wall clock here so the
//! engine itself stays pure.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/categories", get(categories))
        .route("/series", get(series))
        .route("/forecast", get(forecast))
        .route("/goal", get(goal))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.dashboard(today()).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.categories().await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn series(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.series().await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn forecast(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.forecast(today()).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn goal(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.goal(today()).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
