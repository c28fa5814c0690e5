mod environment;
mod settings;

pub use ::config::{FileFormat, Map};

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ENV_PREFIX, LOCAL_ENV_FILE, LoggingSettings, ServerSettings, Settings, SettingsError,
    StubSettings, TelemetrySettings,
};
