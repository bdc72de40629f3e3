//! stationwx error types

use std::path::PathBuf;

/// stationwx error types
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request timed out: {0}")]
    Timeout(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// A value needed to issue a request is not available yet
    /// (e.g. alerts before the first observation supplied coordinates).
    #[error("missing field: {0}")]
    MissingField(&'static str),

    // Cache errors
    #[error("failed to write cache entry {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read cache entry {path}: {source}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown key: {0}")]
    UnknownKey(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl WeatherError {
    /// Whether this error came from talking to the remote provider.
    ///
    /// Fetch failures are isolated to the group that issued the request;
    /// the caller degrades the affected fields to the unknown marker.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            WeatherError::Http(_)
                | WeatherError::Api { .. }
                | WeatherError::Timeout(_)
                | WeatherError::Json(_)
                | WeatherError::InvalidResponse(_)
                | WeatherError::MissingField(_)
        )
    }

    /// Whether a refresh failed to persist its values.
    pub fn is_cache_write(&self) -> bool {
        matches!(self, WeatherError::CacheWrite { .. })
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            WeatherError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            WeatherError::Http(err.to_string())
        }
    }
}

/// Result type alias for stationwx operations
pub type Result<T> = std::result::Result<T, WeatherError>;
