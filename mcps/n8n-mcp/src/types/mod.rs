//! Type definitions for n8n data
//!
//! `execution` holds the upstream record as fetched; `summary` and `node`
//! hold the bounded views derived from it for one tool response.

pub mod execution;
pub mod node;
pub mod summary;

pub use execution::{Execution, ExecutionStatus, NodeRun, NodeStatus, RunData};
pub use node::{ItemSet, NodeExecutionData};
pub use summary::{AvailableNode, ExecutionStatistics, ExecutionSummary, Guidance, GuidanceExample};
