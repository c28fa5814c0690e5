use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::services::DelaySimulator;

/// Holds the request back for its configured delay, then hands it on
/// untouched. Whatever the downstream handler returns, errors included, is
/// returned as is.
pub async fn stub_delay_middleware(
    State(simulator): State<Arc<DelaySimulator>>,
    request: Request,
    next: Next,
) -> Response {
    simulator
        .simulate(request.method().as_str(), request.uri().path())
        .await;
    next.run(request).await
}
