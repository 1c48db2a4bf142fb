//! Error types for n8n API calls

use serde_json::Value;
use thiserror::Error;

/// No response was received (connection refused, DNS, timeout, ...)
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Normalized upstream failure, raised after retries are exhausted or
/// immediately for a non-retryable status
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Human-readable message including the status and upstream message
    pub message: String,
    /// Upstream response body, when it was JSON
    pub body: Option<Value>,
    /// API-relative request path
    pub path: Option<String>,
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build from a received error response
    pub fn from_status(status: u16, body: Option<Value>, path: &str) -> Self {
        let upstream_message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty());

        let message = match upstream_message {
            Some(upstream) => format!("n8n API error (status {}): {}", status, upstream),
            None => format!("n8n API error (status {})", status),
        };

        Self {
            status: Some(status),
            message,
            body,
            path: Some(path.to_string()),
        }
    }

    /// Build from a request that never produced a response
    pub fn from_transport(err: &TransportError, path: &str) -> Self {
        Self {
            status: None,
            message: format!("n8n API request failed: {}", err.message),
            body: None,
            path: Some(path.to_string()),
        }
    }

    /// Build for a success response whose body could not be decoded
    pub fn invalid_body(path: &str, err: &serde_json::Error) -> Self {
        Self {
            status: None,
            message: format!("n8n API returned an unexpected response: {}", err),
            body: None,
            path: Some(path.to_string()),
        }
    }
}
