use axum::{response::IntoResponse, Json};
use chrono::Utc;

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "time": Utc::now(),
    }))
}
