use serde::Deserialize;
use thiserror::Error;

/// Failure of a single request against the TMDB API.
///
/// Kept `Clone` so results can travel inside iced messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 401, the bearer token is missing or was rejected.
    #[error("TMDB rejected the API token")]
    Unauthorized,

    /// HTTP 429.
    #[error("TMDB rate limit exceeded")]
    RateLimited,

    /// Any other non-2xx status.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    /// 2xx status but the body could not be decoded into the expected shape.
    #[error("malformed TMDB response: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    #[serde(default)]
    status_message: String,
}

impl ApiError {
    /// Maps a non-2xx status and its body to an error, reading TMDB's
    /// `status_message` when the body carries one.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Unauthorized,
            429 => Self::RateLimited,
            _ => {
                let message = serde_json::from_str::<TmdbErrorBody>(body)
                    .ok()
                    .map(|b| b.status_message)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| body.trim().to_string());
                Self::Upstream { status, message }
            }
        }
    }

    /// Text shown in the error state of a page.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => {
                String::from("Your TMDB API token was rejected. Check your settings.")
            }
            Self::RateLimited => {
                String::from("Too many requests to TMDB. Wait a moment and try again.")
            }
            Self::Network(_) | Self::Upstream { .. } | Self::Malformed(_) => {
                String::from("Could not load data. Please try again later.")
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Malformed(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine the config directory (HOME is not set)")]
    NoConfigDir,

    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
