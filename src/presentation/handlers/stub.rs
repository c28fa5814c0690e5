use axum::Json;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Serialize;

use crate::application::ports::{StubActionError, StubRequest};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: StubError,
}

#[derive(Serialize)]
pub struct StubError {
    pub message: String,
    pub r#type: String,
}

/// Serves every route without a dedicated handler through the stub actions.
#[tracing::instrument(skip_all, fields(method = %method, path = %uri.path()))]
pub async fn stub_action_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = StubRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body,
    };

    match state.stub_actions.respond(request).await {
        Ok(response) => (
            response.status,
            [(CONTENT_TYPE, response.content_type)],
            response.body,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Stub action failed");
            stub_error_response(e)
        }
    }
}

fn stub_error_response(error: StubActionError) -> Response {
    let (status, kind) = match &error {
        StubActionError::Unavailable(_) => (StatusCode::BAD_GATEWAY, "upstream_unavailable"),
        StubActionError::Failed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "stub_error"),
    };

    (
        status,
        Json(ErrorResponse {
            error: StubError {
                message: error.to_string(),
                r#type: kind.to_string(),
            },
        }),
    )
        .into_response()
}
