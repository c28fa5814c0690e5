use crate::presentation::config::{Environment, Settings};

pub const DEFAULT_SERVICE_NAME: &str = "cdms-gateway";
const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Configuration for tracing and OpenTelemetry initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub log_level: String,
    pub service_name: String,
    /// OTLP collector endpoint; export is disabled when absent.
    pub otlp_endpoint: Option<String>,
}

impl TracingConfig {
    pub fn from_settings(settings: &Settings, environment: Environment) -> Self {
        Self {
            environment: environment.to_string(),
            json_format: settings.logging.json,
            log_level: settings.logging.level.clone(),
            service_name: settings.telemetry.service_name.clone(),
            otlp_endpoint: settings
                .telemetry
                .otlp_endpoint
                .clone()
                .or_else(otlp_endpoint_from_env)
                .filter(|e| !e.trim().is_empty()),
        }
    }

    pub fn otel_enabled(&self) -> bool {
        self.otlp_endpoint.is_some()
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT")
                .unwrap_or_else(|_| Environment::Local.to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            log_level: String::from("info"),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            otlp_endpoint: otlp_endpoint_from_env().filter(|e| !e.trim().is_empty()),
        }
    }
}

fn otlp_endpoint_from_env() -> Option<String> {
    std::env::var(OTLP_ENDPOINT_VAR).ok()
}
