use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};
use chrono::Utc;

use crate::app::services::AppServices;

/// Liveness plus a live store probe; always 200 so load balancers see a
/// running process even when the store is down.
pub async fn health(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    let database = services.database_status().await;
    Json(serde_json::json!({
        "status": "ok",
        "database": database,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
