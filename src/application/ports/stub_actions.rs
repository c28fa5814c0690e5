use async_trait::async_trait;
use axum::http::{HeaderMap, Method, StatusCode};
use bytes::Bytes;

/// An inbound request as seen by a stub endpoint.
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Bytes,
}

/// Behaviour performed by a stub endpoint once any simulated delay is over.
#[async_trait]
pub trait StubActions: Send + Sync {
    async fn respond(&self, request: StubRequest) -> Result<StubResponse, StubActionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StubActionError {
    #[error("stubbed dependency unavailable: {0}")]
    Unavailable(String),
    #[error("stub action failed: {0}")]
    Failed(String),
}
