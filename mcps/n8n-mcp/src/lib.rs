//! n8n MCP Library
//!
//! MCP tools for inspecting n8n workflow executions without flooding the
//! caller's context: `get_execution` returns a bounded summary and the node
//! index, `get_execution_by_node` drills into one node with its items capped.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use mcp_common::ToolDispatch;
//! use n8n_mcp::{Config, N8nMcpServer};
//!
//! let server = N8nMcpServer::new(&Config::load()?)?;
//! let result = server
//!     .call_tool("get_execution", serde_json::json!({ "id": "12345" }))
//!     .await?;
//! ```
//!
//! # Features
//! - Executions: summary, per-node detail, listing
//! - Workflows: list, get, create, update, delete
//! - Transport retry with exponential backoff on network failures and 5xx

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod params;
pub mod server;
pub mod types;

pub use config::Config;
pub use error::{ToolError, ToolResult};
pub use server::N8nMcpServer;
