use axum::Router;

pub mod insights;
pub mod system;

/// Router for the versioned API surface.
pub fn router() -> Router {
    Router::new().merge(insights::router())
}
