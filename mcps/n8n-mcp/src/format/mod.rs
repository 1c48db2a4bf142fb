//! Formatters turning upstream records into bounded tool payloads
//!
//! All functions here are pure: they take parsed upstream data and return
//! the view handed to the response envelope.

pub mod listing;
pub mod node;
pub mod summary;

/// Per-node item cap applied to node input and output
pub const MAX_NODE_ITEMS: usize = 50;

/// Node name used in the guidance example when an execution has no nodes
pub const FALLBACK_NODE_NAME: &str = "Start";

pub use listing::{execution_view, workflow_view, Verbosity};
pub use node::format_node_execution;
pub use summary::format_summary;
