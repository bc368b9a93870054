use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use insights_ai::AnalysisError;
use insights_infra::StoreError;

/// Map an analysis failure to a response. Everything here is 5xx: a failed
/// upstream call is the server's problem, never the caller's.
pub fn analysis_error_to_response(err: AnalysisError) -> axum::response::Response {
    match &err {
        AnalysisError::MissingApiKey => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "configuration_error",
            err.to_string(),
        ),
        AnalysisError::Transport(_)
        | AnalysisError::UpstreamStatus { .. }
        | AnalysisError::UpstreamPayload(_) => {
            json_error(StatusCode::BAD_GATEWAY, "upstream_error", err.to_string())
        }
    }
}

/// A store miss on completion means we lost a record we just created —
/// an invariant violation, not a caller error.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "failed to persist analysis",
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
