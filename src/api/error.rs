//! Normalized failures for every call made through the [`Transport`].
//!
//! The client boundary classifies each failure exactly once. Everything
//! above it (resource APIs, hooks, screens) only ever sees one of these
//! variants, and the `Display` text is what ends up in front of the user.
//!
//! Classification priority, highest first:
//!
//! 1. HTTP 404 → [`ApiError::NotFound`]
//! 2. HTTP ≥ 500 → [`ApiError::Server`]
//! 3. No response at all (connect failure, timeout) → [`ApiError::Network`]
//! 4. Anything else → [`ApiError::Unknown`], message passed through verbatim
//!
//! [`Transport`]: super::client::Transport

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,

    /// Any 5xx. The status is kept for the log, not for the user.
    #[error("Server error. Please try again later.")]
    Server { status: u16 },

    /// No response was received. Timeouts land here too.
    #[error("Network error. Please check your connection.")]
    Network(String),

    /// Unclassified failure; the message is shown as-is.
    #[error("{0}")]
    Unknown(String),

    /// The body arrived but did not match the documented shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Maps a non-success HTTP status (and its body text) to a variant.
    ///
    /// Unclassified statuses keep the server's `detail` string when the body
    /// is a JSON error document, otherwise a generic status line.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 404 {
            ApiError::NotFound
        } else if status >= 500 {
            ApiError::Server { status }
        } else {
            ApiError::Unknown(
                error_detail(body)
                    .unwrap_or_else(|| format!("Request failed with status code {status}")),
            )
        }
    }

    /// The message to show in an error panel, or `None` when this error
    /// carries nothing a user can read and the caller should fall back to
    /// its own wording.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ApiError::Decode(_) => None,
            ApiError::Unknown(msg) if msg.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

/// Pulls `detail` out of a `{"detail": "..."}` error body.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return ApiError::from_status(status.as_u16(), "");
        }
        if e.is_timeout() || e.is_connect() || e.is_request() {
            return ApiError::Network(e.to_string());
        }
        if e.is_decode() {
            return ApiError::Decode(e.to_string());
        }
        ApiError::Unknown(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
