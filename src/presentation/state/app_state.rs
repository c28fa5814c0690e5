use std::sync::Arc;

use crate::application::ports::StubActions;
use crate::application::services::DelaySimulator;
use crate::infrastructure::observability::HttpMetrics;
use crate::presentation::router::DelayScope;

#[derive(Clone)]
pub struct AppState {
    pub stub_actions: Arc<dyn StubActions>,
    pub delay_simulator: Arc<DelaySimulator>,
    pub http_metrics: Arc<HttpMetrics>,
    pub delay_scope: DelayScope,
}
