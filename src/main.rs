use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use cdms_gateway_stub::application::services::DelaySimulator;
use cdms_gateway_stub::infrastructure::observability::{HttpMetrics, TracingConfig, init_tracing};
use cdms_gateway_stub::infrastructure::stub::EchoStubActions;
use cdms_gateway_stub::presentation::{AppState, DelayScope, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;
    let delay_config = Arc::new(
        settings
            .delay_config()
            .context("invalid stub delay configuration")?,
    );
    let addr = settings.socket_addr()?;

    let telemetry = init_tracing(
        &TracingConfig::from_settings(&settings, environment),
        addr.port(),
    )?;
    tracing::info!(otlp_export = telemetry.is_exporting(), "Starting application");

    for (key, delay) in delay_config.entries() {
        tracing::debug!(route = %key, delay_ms = delay.as_millis() as u64, "Stub delay configured");
    }

    let delay_scope = DelayScope::from_settings(&settings.stub);
    tracing::info!(
        stub_delays = delay_config.len(),
        delay_scope = ?delay_scope,
        "Stub delay simulation ready"
    );

    let state = AppState {
        stub_actions: Arc::new(EchoStubActions),
        delay_simulator: Arc::new(DelaySimulator::new(delay_config)),
        http_metrics: Arc::new(HttpMetrics::from_global()),
        delay_scope,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        tracing::error!(error = %e, "Server stopped with an error");
    }

    tracing::info!("Shutting down");
    telemetry.shutdown();

    served.context("server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
