//! API error types.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by the bracket API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` comes from the body's `message` field when present.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: Value,
    },

    /// No response within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or transport failure.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Body could not be encoded or decoded.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout)
        } else {
            ApiError::Network(err)
        }
    }

    /// HTTP status, for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport failures, 429 and 5xx are worth another attempt; timeouts and other 4xx are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http { status, .. } => *status == 429 || *status >= 500,
            ApiError::Network(_) => true,
            _ => false,
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { status, message, .. } => match status {
                400 => "Invalid bracket configuration. Please check your settings.".to_string(),
                401 => "You need to be logged in to manage brackets.".to_string(),
                403 => "You don't have permission to modify this bracket.".to_string(),
                404 => "Bracket not found. It may have been deleted or moved.".to_string(),
                409 => "Bracket conflict. Another update may be in progress.".to_string(),
                422 => "Invalid data provided. Please verify all required fields.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500 => "Server error occurred. Our team has been notified.".to_string(),
                _ if message.is_empty() => "An unexpected error occurred.".to_string(),
                _ => message.clone(),
            },
            ApiError::Timeout(_) => {
                "Request timed out. Please check your connection and try again.".to_string()
            }
            ApiError::Network(_) => "Network error. Please check your internet connection.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
