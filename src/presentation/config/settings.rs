use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment as EnvironmentSource, File, FileFormat, Map};
use serde::Deserialize;

use crate::domain::{DelayConfig, DelayConfigError, RawDelay};

use super::Environment;

pub const LOCAL_ENV_FILE: &str = "Properties/local.env";
pub const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid stub delay configuration: {0}")]
    StubDelays(#[from] DelayConfigError),
    #[error("invalid server address {host}:{port}")]
    InvalidAddress { host: String, port: u16 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub telemetry: TelemetrySettings,
    pub stub: StubSettings,
    /// Route key (`"/orders"` or `"GET /orders"`) to delay in milliseconds.
    #[serde(default)]
    pub stub_delays: HashMap<String, RawDelay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    pub service_name: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StubSettings {
    /// Whether `/health` sits behind the delay middleware.
    pub delay_health_checks: bool,
}

impl Settings {
    /// Loads settings for `environment` from, in increasing precedence:
    /// defaults, `appsettings.<Environment>`, `Properties/local.env` (INI) and
    /// `APP__`-prefixed environment variables.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        Self::load_layered(Path::new("."), environment, None)
    }

    /// Same layering as [`Settings::load`], with files resolved under
    /// `base_dir`. `env_vars` replaces the process environment when given.
    pub fn load_layered(
        base_dir: &Path,
        environment: Environment,
        env_vars: Option<Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let settings_file = base_dir.join(environment.settings_file());
        let local_env_file = base_dir.join(LOCAL_ENV_FILE);

        let config = Self::builder()?
            .add_source(File::with_name(&settings_file.to_string_lossy()).required(false))
            .add_source(
                File::new(&local_env_file.to_string_lossy(), FileFormat::Ini).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(env_vars),
            )
            .build()?;

        Self::from_config(config)
    }

    /// Defaults layered under a single inline source; used by tests and tools.
    pub fn from_inline(content: &str, format: FileFormat) -> Result<Self, SettingsError> {
        let config = Self::builder()?
            .add_source(File::from_str(content, format))
            .build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        // Reject malformed delays here so startup fails before binding.
        settings.delay_config()?;
        Ok(settings)
    }

    pub fn delay_config(&self) -> Result<DelayConfig, DelayConfigError> {
        DelayConfig::from_raw(&self.stub_delays)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|_| SettingsError::InvalidAddress {
                host: self.server.host.clone(),
                port: self.server.port,
            })
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("telemetry.service_name", "cdms-gateway")?
            .set_default("stub.delay_health_checks", true)?)
    }
}
