use std::fmt;
use std::str::FromStr;

/// Request-matching key for a simulated delay: an optional HTTP method and a
/// normalised path, written as `"GET /orders"` or `"/orders"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelayKey {
    method: Option<String>,
    path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelayKeyError {
    #[error("delay key is empty")]
    Empty,
    #[error("delay key path must start with '/': {0}")]
    RelativePath(String),
    #[error("delay key has an invalid HTTP method: {0}")]
    InvalidMethod(String),
}

impl DelayKey {
    pub fn for_path(path: &str) -> Self {
        Self {
            method: None,
            path: normalize_path(path),
        }
    }

    pub fn for_route(method: &str, path: &str) -> Self {
        Self {
            method: Some(method.to_ascii_uppercase()),
            path: normalize_path(path),
        }
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for DelayKey {
    type Err = DelayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DelayKeyError::Empty);
        }

        let (method, path) = match trimmed.split_once(char::is_whitespace) {
            Some((method, path)) => (Some(method), path.trim()),
            None => (None, trimmed),
        };

        if !path.starts_with('/') {
            return Err(DelayKeyError::RelativePath(path.to_string()));
        }

        match method {
            Some(method) if !is_method_token(method) => {
                Err(DelayKeyError::InvalidMethod(method.to_string()))
            }
            Some(method) => Ok(Self::for_route(method, path)),
            None => Ok(Self::for_path(path)),
        }
    }
}

impl fmt::Display for DelayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(f, "{} {}", method, self.path),
            None => f.write_str(&self.path),
        }
    }
}

/// Lower-cases the path and drops a trailing slash (the root path is kept).
pub fn normalize_path(path: &str) -> String {
    let lowered = path.trim().to_ascii_lowercase();
    match lowered.trim_end_matches('/') {
        "" => String::from("/"),
        trimmed => trimmed.to_string(),
    }
}

// RFC 9110 token characters.
fn is_method_token(method: &str) -> bool {
    !method.is_empty()
        && method.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}
