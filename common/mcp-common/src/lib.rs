//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] driven by an explicit [`LogSettings`]
//! - **Envelope**: the uniform `{success, message, data | error}` tool answer
//! - **Governor**: response size limits and pagination
//! - **Redaction**: credential-like keys stripped from error context
//! - **Results**: helpers for building `CallToolResult` responses
//! - **Dispatch**: [`ToolDispatch`] for listing and calling tools in-process
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{envelope_result, Envelope, SizeGovernor};
//!
//! let data = SizeGovernor::default().apply(serde_json::to_value(&summary)?);
//! let result = envelope_result(&Envelope::success("Execution summary", data));
//! ```

pub mod dispatch;
pub mod envelope;
pub mod governor;
pub mod init;
pub mod redact;
pub mod result;

// Re-export commonly used items at crate root
pub use dispatch::{parse_arguments, DispatchError, DispatchResult, ToolDispatch};
pub use envelope::{Envelope, EnvelopeError};
pub use governor::{paginate, Page, PageInfo, SizeGovernor, DEFAULT_MAX_RESPONSE_CHARS};
pub use init::{init_tracing, LogSettings};
pub use redact::{redact_map, redact_value};
pub use result::{envelope_result, first_text, json_success, text_success, McpResult};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing ToolDispatch
pub use async_trait::async_trait;
