//! By-name tool dispatch for in-process use
//!
//! [`ToolDispatch`] exposes a server's tool set as data: the tools can be
//! enumerated with their input schemas and invoked by name with a JSON
//! argument object, without an MCP transport in between. Servers built on
//! rmcp's `#[tool_router]` implement it by delegating to their router.
//!
//! ```rust,ignore
//! use mcp_common::ToolDispatch;
//!
//! let names = server.tool_names();
//! let result = server.call_tool("get_execution", serde_json::json!({ "id": "42" })).await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Error type for in-process tool dispatch
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No tool is registered under this name
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// The argument object does not match the tool's input schema
    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    /// The tool returned a protocol-level error
    #[error("mcp error: {0}")]
    Mcp(String),
}

impl From<rmcp::ErrorData> for DispatchError {
    fn from(err: rmcp::ErrorData) -> Self {
        DispatchError::Mcp(err.message.to_string())
    }
}

/// Result type for in-process dispatch
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Deserialize a tool's argument object, tagging failures with the tool name
pub fn parse_arguments<T: DeserializeOwned>(tool: &str, args: Value) -> DispatchResult<T> {
    serde_json::from_value(args).map_err(|source| DispatchError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

/// A server whose tools can be listed and invoked by name
#[async_trait]
pub trait ToolDispatch: Send + Sync {
    /// Name used in MCP configuration files
    fn server_name(&self) -> &str;

    /// All tools with their descriptions and input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Invoke the tool registered under `name`
    async fn call_tool(&self, name: &str, args: Value) -> DispatchResult<CallToolResult>;

    /// Registered tool names, sorted
    fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .list_tools()
            .iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    struct EmptyServer;

    #[async_trait]
    impl ToolDispatch for EmptyServer {
        fn server_name(&self) -> &str {
            "empty"
        }

        fn list_tools(&self) -> Vec<Tool> {
            vec![]
        }

        async fn call_tool(&self, name: &str, _args: Value) -> DispatchResult<CallToolResult> {
            Err(DispatchError::ToolNotFound(name.to_string()))
        }
    }

    #[derive(Debug, Deserialize)]
    struct Args {
        id: String,
    }

    #[test]
    fn test_parse_arguments_reports_tool() {
        let err = parse_arguments::<Args>("get_thing", serde_json::json!({})).unwrap_err();
        assert!(err.to_string().contains("get_thing"));

        let ok: Args = parse_arguments("get_thing", serde_json::json!({ "id": "7" })).unwrap();
        assert_eq!(ok.id, "7");
    }

    #[test]
    fn test_tool_names_empty() {
        assert!(EmptyServer.tool_names().is_empty());
        assert_eq!(EmptyServer.server_name(), "empty");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = EmptyServer.call_tool("missing", serde_json::json!({})).await;
        assert!(matches!(result, Err(DispatchError::ToolNotFound(_))));
    }
}
