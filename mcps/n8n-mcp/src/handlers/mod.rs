//! Handler implementations for n8n MCP tools
//!
//! Organized by domain: execution, workflow. Each handler validates its
//! input, makes the client calls it needs and returns a [`ToolSuccess`] or
//! a [`ToolError`]; [`respond`] turns either into the tool answer.

mod execution;
mod workflow;

pub use execution::*;
pub use workflow::*;

use mcp_common::{envelope_result, CallToolResult, Envelope, SizeGovernor};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{ToolError, ToolResult};
use crate::params::IdParam;
use crate::types::ExecutionStatus;

/// Successful handler output, before size governance
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSuccess {
    pub message: String,
    pub data: Value,
}

impl ToolSuccess {
    pub fn new(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Render a handler outcome as an in-band tool answer.
///
/// Success data is bounded by `governor`. Failures are logged with their
/// redacted context and rendered with `is_error` set.
pub fn respond(tool: &str, governor: &SizeGovernor, outcome: ToolResult<ToolSuccess>) -> CallToolResult {
    match outcome {
        Ok(success) => {
            debug!(tool, "tool succeeded");
            envelope_result(&Envelope::success(success.message, governor.apply(success.data)))
        }
        Err(err) => {
            let details = Value::Object(err.details());
            error!(
                tool,
                code = err.code(),
                details = %details,
                "{}",
                err
            );
            envelope_result(&err.to_envelope())
        }
    }
}

// ============================================================================
// Input validation
// ============================================================================

/// Execution ids are non-empty strings of digits
pub fn validate_execution_id(id: &IdParam) -> ToolResult<String> {
    let id = id.to_string();
    let trimmed = id.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(
            ToolError::validation("Execution ID must be a non-empty numeric string")
                .with_context("id", id.clone()),
        );
    }
    Ok(trimmed.to_string())
}

pub fn validate_workflow_id(id: &IdParam) -> ToolResult<String> {
    let id = id.to_string();
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ToolError::validation("Workflow ID must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Node names are matched exactly, so only the empty name is rejected
pub fn validate_node_name(name: &str) -> ToolResult<&str> {
    if name.is_empty() {
        return Err(ToolError::validation("Node name must not be empty"));
    }
    Ok(name)
}

/// Resolve an optional limit against its default and inclusive maximum
pub fn validate_limit(limit: Option<i64>, default: u32, max: u32) -> ToolResult<u32> {
    match limit {
        None => Ok(default),
        Some(n) if n >= 1 && n <= i64::from(max) => Ok(n as u32),
        Some(n) => Err(
            ToolError::validation(format!("limit must be between 1 and {}", max))
                .with_context("limit", n),
        ),
    }
}

pub fn validate_offset(offset: Option<i64>) -> ToolResult<usize> {
    match offset {
        None => Ok(0),
        Some(n) if n >= 0 => Ok(n as usize),
        Some(n) => Err(ToolError::validation("offset must not be negative").with_context("offset", n)),
    }
}

pub fn validate_status(status: Option<&str>) -> ToolResult<Option<ExecutionStatus>> {
    match status {
        None => Ok(None),
        Some(raw) => ExecutionStatus::parse(raw).map(Some).ok_or_else(|| {
            let allowed: Vec<&str> = ExecutionStatus::ALL.iter().map(|s| s.as_str()).collect();
            ToolError::validation(format!(
                "Invalid status '{}'. Expected one of: {}",
                raw,
                allowed.join(", ")
            ))
            .with_context("status", raw)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_common::first_text;
    use serde_json::json;

    #[test]
    fn test_execution_id_validation() {
        assert_eq!(validate_execution_id(&"12345".into()).unwrap(), "12345");
        assert_eq!(validate_execution_id(&IdParam::Number(7)).unwrap(), "7");
        assert_eq!(validate_execution_id(&" 42 ".into()).unwrap(), "42");

        for bad in ["", "   ", "abc", "12a", "-1"] {
            let err = validate_execution_id(&bad.into()).unwrap_err();
            assert_eq!(err.code(), "VALIDATION_ERROR", "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_node_name_validation() {
        assert_eq!(validate_node_name("HTTP Request").unwrap(), "HTTP Request");
        assert_eq!(validate_node_name(" Trailing ").unwrap(), " Trailing ");
        assert!(validate_node_name("").is_err());
    }

    #[test]
    fn test_limit_validation() {
        assert_eq!(validate_limit(None, 20, 100).unwrap(), 20);
        assert_eq!(validate_limit(Some(1), 20, 100).unwrap(), 1);
        assert_eq!(validate_limit(Some(100), 20, 100).unwrap(), 100);
        assert!(validate_limit(Some(0), 20, 100).is_err());
        assert!(validate_limit(Some(101), 20, 100).is_err());
        assert!(validate_limit(Some(-5), 20, 100).is_err());
    }

    #[test]
    fn test_offset_validation() {
        assert_eq!(validate_offset(None).unwrap(), 0);
        assert_eq!(validate_offset(Some(10)).unwrap(), 10);
        assert!(validate_offset(Some(-1)).is_err());
    }

    #[test]
    fn test_status_validation() {
        assert_eq!(validate_status(None).unwrap(), None);
        assert_eq!(validate_status(Some("Error")).unwrap(), Some(ExecutionStatus::Error));
        let err = validate_status(Some("crashed")).unwrap_err();
        assert!(err.to_string().contains("canceled"));
    }

    #[test]
    fn test_respond_success_applies_governor() {
        let items: Vec<Value> = (0..100).map(|i| json!({ "row": i, "pad": "x".repeat(50) })).collect();
        let result = respond(
            "test",
            &SizeGovernor::new(1_000),
            Ok(ToolSuccess::new("rows", Value::Array(items))),
        );

        assert!(!result.is_error.unwrap_or(false));
        let envelope: Envelope = serde_json::from_str(first_text(&result).unwrap()).unwrap();
        let data = envelope.data.unwrap();
        assert!(data.as_array().unwrap().len() < 100);
        assert!(!data.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_respond_failure_is_in_band() {
        let result = respond(
            "test",
            &SizeGovernor::default(),
            Err(ToolError::not_found("missing").with_context("nodeName", "Foo")),
        );

        assert_eq!(result.is_error, Some(true));
        let envelope: Envelope = serde_json::from_str(first_text(&result).unwrap()).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message, "missing");
        let error = envelope.error.unwrap();
        assert_eq!(error.code, "NOT_FOUND");
        assert_eq!(error.details["nodeName"], "Foo");
    }
}
