//! Single-node detail: the second stage of progressive loading

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::execution::NodeStatus;

/// Full detail of one node's first run within one execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExecutionData {
    pub execution_id: String,
    pub node_name: String,
    pub node_type: String,
    pub status: NodeStatus,
    pub execution_time: Option<i64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub parameters: Map<String, Value>,
    pub input: ItemSet,
    pub output: ItemSet,
    /// Upstream error object verbatim; `null` when the node succeeded
    pub error: Option<Value>,
}

/// A capped collection of node items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSet {
    pub items: Vec<Value>,
    /// Item count before the cap was applied
    pub total_items: usize,
    pub truncated: bool,
}

impl ItemSet {
    /// Keep at most `cap` items from the front of `items`
    pub fn capped(items: &[Value], cap: usize) -> Self {
        Self {
            items: items.iter().take(cap).cloned().collect(),
            total_items: items.len(),
            truncated: items.len() > cap,
        }
    }
}
