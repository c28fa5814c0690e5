use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

pub const HEALTHY: &str = "Healthy";

/// Liveness probe; reports `Healthy` as plain text.
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, [(CONTENT_TYPE, "text/plain")], HEALTHY)
}
