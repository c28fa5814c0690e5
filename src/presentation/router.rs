use std::sync::Arc;

use axum::Router;
use axum::handler::Handler;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::{http_metrics_middleware, request_id_middleware};
use crate::presentation::config::StubSettings;
use crate::presentation::handlers::{health_handler, stub_action_handler};
use crate::presentation::middleware::stub_delay_middleware;
use crate::presentation::state::AppState;

/// Which routes sit behind the stub delay middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DelayScope {
    /// Every route, `/health` included.
    #[default]
    AllRoutes,
    /// Every route except `/health` (and `/health/`), which always answers
    /// immediately.
    ExcludeHealth,
}

impl DelayScope {
    pub fn from_settings(settings: &StubSettings) -> Self {
        if settings.delay_health_checks {
            Self::AllRoutes
        } else {
            Self::ExcludeHealth
        }
    }
}

/// Builds the stub router.
///
/// Requests pass, outermost first, through: HTTP metrics, the `tower-http`
/// trace layer, the request-id span, the stub delay (per [`DelayScope`]) and
/// finally `/health` or the stub action fallback.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let delay_layer = middleware::from_fn_with_state(
        Arc::clone(&state.delay_simulator),
        stub_delay_middleware,
    );

    let health = match state.delay_scope {
        DelayScope::AllRoutes => get(health_handler).layer(delay_layer.clone()),
        DelayScope::ExcludeHealth => get(health_handler),
    };

    Router::new()
        .route("/health", health.clone())
        .route("/health/", health)
        .fallback(stub_action_handler.layer(delay_layer))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.http_metrics),
            http_metrics_middleware,
        ))
        .with_state(state)
}
