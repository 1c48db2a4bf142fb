//! Execution summary: the first stage of progressive loading

use serde::{Deserialize, Serialize};

use super::execution::{ExecutionStatus, NodeStatus};

/// Compact view of one execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSummary {
    pub id: String,
    pub workflow_id: Option<String>,
    pub status: ExecutionStatus,
    pub started_at: Option<String>,
    pub stopped_at: Option<String>,
    /// Milliseconds between start and stop; absent while running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    pub statistics: ExecutionStatistics,
    pub available_nodes: Vec<AvailableNode>,
    #[serde(rename = "_guidance")]
    pub guidance: Guidance,
}

/// Aggregate counts over the first run of every node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStatistics {
    pub total_nodes: usize,
    pub executed_nodes: usize,
    pub successful_nodes: usize,
    pub failed_nodes: usize,
    pub total_items_processed: usize,
}

/// Index entry for a node that appears in the run data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableNode {
    pub node_name: String,
    pub node_type: String,
    pub status: NodeStatus,
}

/// Hint steering the caller to the drill-down tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    pub message: String,
    pub example: GuidanceExample,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceExample {
    pub tool: String,
    pub id: String,
    pub node_name: String,
}
