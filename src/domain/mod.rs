mod delay_config;
mod delay_key;

pub use delay_config::{DelayConfig, DelayConfigError, RawDelay};
pub use delay_key::{DelayKey, DelayKeyError, normalize_path};
