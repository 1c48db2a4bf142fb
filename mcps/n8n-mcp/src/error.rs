//! Error taxonomy for n8n tools
//!
//! Every variant carries a message and a context map. The map is redacted
//! (see [`mcp_common::redact_map`]) before it is logged or returned, so it
//! may safely hold request details.

use mcp_common::{redact_map, Envelope};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::api::ApiError;

/// Structured context attached to an error
pub type ErrorContext = Map<String, Value>;

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures surfaced by the tool layer
#[derive(Error, Debug)]
pub enum ToolError {
    /// Caller-supplied input failed a local precondition
    #[error("{message}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    /// The resource (or a node inside an execution) does not exist
    #[error("{message}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Upstream failure; retries are already exhausted when this is raised
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
        details: Option<Value>,
        context: ErrorContext,
        #[source]
        source: Option<BoxedCause>,
    },

    /// Upstream rejected the credentials
    #[error("{message}")]
    Authentication {
        message: String,
        context: ErrorContext,
    },

    /// Local file access failed (workflow import/export)
    #[error("{message}")]
    File {
        message: String,
        path: String,
        context: ErrorContext,
    },
}

/// Result type alias for tool operations
pub type ToolResult<T> = Result<T, ToolError>;

impl ToolError {
    pub fn validation(message: impl Into<String>) -> Self {
        ToolError::Validation {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ToolError::NotFound {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        ToolError::Authentication {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn file(message: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let mut context = ErrorContext::new();
        context.insert("path".into(), Value::String(path.clone()));
        ToolError::File {
            message: message.into(),
            path,
            context,
        }
    }

    /// Wrap an arbitrary error as an API-shaped failure, keeping it as the cause
    pub fn wrap<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        ToolError::Api {
            message: message.into(),
            status: None,
            details: None,
            context: ErrorContext::new(),
            source: Some(cause.into()),
        }
    }

    /// Attach a context entry
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context_mut().insert(key.into(), value.into());
        self
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::Validation { .. } => "VALIDATION_ERROR",
            ToolError::NotFound { .. } => "NOT_FOUND",
            ToolError::Api { .. } => "API_ERROR",
            ToolError::Authentication { .. } => "AUTHENTICATION_ERROR",
            ToolError::File { .. } => "FILE_ERROR",
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            ToolError::Validation { context, .. }
            | ToolError::NotFound { context, .. }
            | ToolError::Api { context, .. }
            | ToolError::Authentication { context, .. }
            | ToolError::File { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            ToolError::Validation { context, .. }
            | ToolError::NotFound { context, .. }
            | ToolError::Api { context, .. }
            | ToolError::Authentication { context, .. }
            | ToolError::File { context, .. } => context,
        }
    }

    /// Context with sensitive keys removed, plus status/details for API errors
    pub fn details(&self) -> ErrorContext {
        let mut details = redact_map(self.context());
        if let ToolError::Api { status, details: upstream, .. } = self {
            if let Some(status) = status {
                details.insert("status".into(), Value::from(*status));
            }
            if let Some(upstream) = upstream {
                details.insert("upstream".into(), mcp_common::redact_value(upstream));
            }
        }
        details
    }

    /// Render as a failed response envelope
    pub fn to_envelope(&self) -> Envelope {
        Envelope::failure(self.to_string(), self.code(), &self.details())
    }
}

impl From<ApiError> for ToolError {
    fn from(err: ApiError) -> Self {
        let mut context = ErrorContext::new();
        if let Some(path) = &err.path {
            context.insert("path".into(), Value::String(path.clone()));
        }

        match err.status {
            Some(401) | Some(403) => ToolError::Authentication {
                message: err.message,
                context,
            },
            Some(404) => ToolError::NotFound {
                message: err.message,
                context,
            },
            status => ToolError::Api {
                message: err.message,
                status,
                details: err.body,
                context,
                source: None,
            },
        }
    }
}

impl From<anyhow::Error> for ToolError {
    fn from(err: anyhow::Error) -> Self {
        ToolError::wrap(err.to_string(), err)
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::wrap(format!("Unexpected response shape: {}", err), err)
    }
}
