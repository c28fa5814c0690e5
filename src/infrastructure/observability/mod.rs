mod http_metrics;
mod init_tracing;
mod request_id;
mod tracing_config;

pub use http_metrics::{HttpMetrics, http_metrics_middleware};
pub use init_tracing::{TelemetryGuard, init_tracing};
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use tracing_config::TracingConfig;
