use std::collections::HashMap;
use std::time::Duration;

use super::delay_key::{DelayKey, DelayKeyError, normalize_path};

/// A configured delay value before validation. Integers come from typed
/// sources (TOML, parsed env vars), text from INI files and raw env vars.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum RawDelay {
    Millis(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelayConfigError {
    #[error("invalid delay key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: DelayKeyError,
    },
    #[error("delay for '{key}' is negative: {value}")]
    Negative { key: String, value: i64 },
    #[error("delay for '{key}' is not a whole number of milliseconds: '{value}'")]
    NotANumber { key: String, value: String },
    #[error("delay key '{key}' duplicates '{existing}' after normalisation")]
    DuplicateKey { key: String, existing: String },
}

/// Immutable table of simulated delays, built once at startup.
///
/// Lookup is an exact match on `METHOD PATH`, falling back to an exact match
/// on `PATH`; anything else gets no delay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelayConfig {
    delays: HashMap<DelayKey, Duration>,
}

impl DelayConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: &HashMap<String, RawDelay>) -> Result<Self, DelayConfigError> {
        let mut delays = HashMap::with_capacity(raw.len());
        let mut sources: HashMap<DelayKey, &str> = HashMap::with_capacity(raw.len());

        // Sorted so duplicate reporting does not depend on map iteration order.
        let mut entries: Vec<_> = raw.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for (key, value) in entries {
            let parsed: DelayKey = key.parse().map_err(|source| DelayConfigError::InvalidKey {
                key: key.clone(),
                source,
            })?;
            let millis = parse_millis(key, value)?;

            if let Some(existing) = sources.get(&parsed) {
                return Err(DelayConfigError::DuplicateKey {
                    key: key.clone(),
                    existing: (*existing).to_string(),
                });
            }
            sources.insert(parsed.clone(), key.as_str());
            delays.insert(parsed, Duration::from_millis(millis));
        }

        Ok(Self { delays })
    }

    pub fn from_millis<'a>(
        entries: impl IntoIterator<Item = (&'a str, u64)>,
    ) -> Result<Self, DelayConfigError> {
        let raw = entries
            .into_iter()
            .map(|(key, millis)| {
                let value = i64::try_from(millis).map_err(|_| DelayConfigError::NotANumber {
                    key: key.to_string(),
                    value: millis.to_string(),
                })?;
                Ok((key.to_string(), RawDelay::Millis(value)))
            })
            .collect::<Result<HashMap<_, _>, DelayConfigError>>()?;
        Self::from_raw(&raw)
    }

    pub fn lookup(&self, method: &str, path: &str) -> Duration {
        let path = normalize_path(path);
        let by_route = DelayKey::for_route(method, &path);
        if let Some(delay) = self.delays.get(&by_route) {
            return *delay;
        }
        self.delays
            .get(&DelayKey::for_path(&path))
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&DelayKey, &Duration)> {
        self.delays.iter()
    }
}

fn parse_millis(key: &str, value: &RawDelay) -> Result<u64, DelayConfigError> {
    let millis = match value {
        RawDelay::Millis(millis) => *millis,
        RawDelay::Text(text) => {
            text.trim()
                .parse::<i64>()
                .map_err(|_| DelayConfigError::NotANumber {
                    key: key.to_string(),
                    value: text.clone(),
                })?
        }
    };

    u64::try_from(millis).map_err(|_| DelayConfigError::Negative {
        key: key.to_string(),
        value: millis,
    })
}
