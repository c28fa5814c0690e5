use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;

use crate::application::ports::{StubActionError, StubActions, StubRequest, StubResponse};

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Accepts every request and echoes its body back with `200 OK`.
pub struct EchoStubActions;

#[async_trait::async_trait]
impl StubActions for EchoStubActions {
    async fn respond(&self, request: StubRequest) -> Result<StubResponse, StubActionError> {
        let content_type = request
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        tracing::info!(
            method = %request.method,
            path = %request.path,
            body_bytes = request.body.len(),
            "Stub: acknowledging request"
        );

        Ok(StubResponse {
            status: StatusCode::OK,
            content_type,
            body: request.body,
        })
    }
}
