use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use insights_core::{AnalysisStatus, CompletionUpdate};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/v1/insights", post(create_insights).get(list_insights))
}

/// Analyze one conversation: create a pending record, run the engine,
/// transition to completed, return the full record.
///
/// On engine failure the record stays pending and the error surfaces as a
/// 5xx; there is no failure-status transition and no retry.
pub async fn create_insights(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateInsightsRequest>,
) -> axum::response::Response {
    if let Err(msg) = dto::validate_messages(&body.messages) {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", msg);
    }

    let conversation_id = body
        .conversation_id
        .unwrap_or_else(|| format!("conv-{}", Utc::now().timestamp_millis()));
    let pending = services.store().create_pending(&conversation_id);
    tracing::info!(analysis_id = %pending.id, %conversation_id, "analysis started");

    // Latency covers both model calls plus parsing/normalization.
    let started = Instant::now();
    let outcome = match services.engine().analyze(&body.messages).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(analysis_id = %pending.id, error = %e, "analysis failed, record left pending");
            return errors::analysis_error_to_response(e);
        }
    };
    let latency_ms = started.elapsed().as_millis() as u64;

    let update = CompletionUpdate {
        status: AnalysisStatus::Completed,
        insights: Some(outcome.insights),
        metadata: body.metadata,
        latency_ms: Some(latency_ms),
        error: None,
        assistant_message: outcome.assistant_message,
    };

    let completed = match services.store().complete(pending.id, update) {
        Ok(record) => record,
        Err(e) => return errors::store_error_to_response(e),
    };
    tracing::info!(analysis_id = %completed.id, latency_ms, "analysis completed");

    (StatusCode::OK, Json(completed)).into_response()
}

/// Page through stored records, optionally filtered by exact status.
///
/// An unknown status value simply matches nothing; `total` counts matches
/// before the page slice is taken.
pub async fn list_insights(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListInsightsQuery>,
) -> axum::response::Response {
    let mut items = services.store().list();
    if let Some(status) = &query.status {
        items.retain(|r| r.status.as_str() == status);
    }
    let total = items.len();

    let start = query.page.saturating_sub(1).saturating_mul(query.page_size);
    let page_items: Vec<_> = items
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .collect();

    (
        StatusCode::OK,
        Json(dto::ListInsightsResponse {
            items: page_items,
            page: query.page,
            page_size: query.page_size,
            total,
        }),
    )
        .into_response()
}
