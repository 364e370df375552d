//! Client error types.

use serde_json::Value;

/// Errors that can occur when using the Pinergy client.
///
/// `Authentication` and `Api` together form the API failure family; use
/// [`ClientError::is_api_error`] to handle both at once. `Http` is a transport
/// fault and is never reclassified as an API failure.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An authenticated operation was attempted with no credential attached.
    /// No request was sent.
    #[error("not authenticated: {0}")]
    Authentication(String),

    /// Server returned a non-2xx status, or a side-effecting call reported
    /// `success: false`.
    #[error("API error: {message}")]
    Api {
        /// Server message, or the transport reason when the server sent none.
        message: String,
        /// HTTP status code.
        status: Option<u16>,
        /// Decoded response body (`{}` when empty or unparseable).
        body: Value,
    },

    /// HTTP request failed (connection, DNS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// True for `Api` and `Authentication` failures.
    #[must_use]
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Authentication(_))
    }

    /// HTTP status of an API failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Response body of an API failure.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}
