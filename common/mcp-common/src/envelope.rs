//! Uniform response envelope for tool results
//!
//! Every tool answers with the same outer shape so callers check a single
//! `success` flag:
//!
//! ```json
//! { "success": true,  "message": "...", "data": { ... } }
//! { "success": false, "message": "...", "error": { "code": "NOT_FOUND", "details": { ... } } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::redact::redact_map;

/// Machine-readable failure description inside a failed envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

/// Success or failure wrapper returned by every tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EnvelopeError>,
}

impl Envelope {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Build a failure envelope; `details` is redacted before it is stored
    pub fn failure(
        message: impl Into<String>,
        code: impl Into<String>,
        details: &Map<String, Value>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(EnvelopeError {
                code: code.into(),
                details: redact_map(details),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
