//! Result helpers for MCP tool responses
//!
//! Converts [`Envelope`] values and plain data into `CallToolResult`s. Failed
//! envelopes set `is_error` so the failure travels in-band instead of as a
//! protocol error.

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

use crate::envelope::Envelope;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// Create a successful JSON response from any serializable data
pub fn json_success<T: Serialize>(data: &T) -> McpResult<CallToolResult> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Create a successful plain text response
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Render an envelope as a tool result.
///
/// Never fails: if the envelope cannot be serialized its message is sent as
/// plain text with the same error flag.
pub fn envelope_result(envelope: &Envelope) -> CallToolResult {
    let text = serde_json::to_string_pretty(envelope).unwrap_or_else(|_| envelope.message.clone());
    let content = vec![Content::text(text)];

    if envelope.is_success() {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    }
}

/// Extract the first text block of a tool result, if any
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result.content.first().and_then(|c| {
        if let rmcp::model::RawContent::Text(text) = &c.raw {
            Some(text.text.as_str())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_json_success() {
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let result = json_success(&data).unwrap();
        assert!(!result.is_error.unwrap_or(false));
        assert!(first_text(&result).unwrap().contains("\"value\": 42"));
    }

    #[test]
    fn test_text_success() {
        let result = text_success("hello world");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(first_text(&result), Some("hello world"));
    }

    #[test]
    fn test_envelope_result_success() {
        let result = envelope_result(&Envelope::success("ok", json!({ "n": 1 })));
        assert!(!result.is_error.unwrap_or(false));

        let parsed: Envelope = serde_json::from_str(first_text(&result).unwrap()).unwrap();
        assert!(parsed.success);
    }

    #[test]
    fn test_envelope_result_failure_sets_error_flag() {
        let result = envelope_result(&Envelope::failure("boom", "API_ERROR", &Map::new()));
        assert_eq!(result.is_error, Some(true));

        let parsed: Envelope = serde_json::from_str(first_text(&result).unwrap()).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.unwrap().code, "API_ERROR");
    }
}
