//! Execution summary formatter

use crate::types::{
    AvailableNode, Execution, ExecutionStatistics, ExecutionSummary, Guidance, GuidanceExample,
    NodeStatus,
};

use super::FALLBACK_NODE_NAME;

/// Build the compact summary of an execution.
///
/// Every key in `runData` counts as an executed node. Only a node's first
/// run is considered, and only the first output branch is counted towards
/// `totalItemsProcessed`.
pub fn format_summary(execution: &Execution) -> ExecutionSummary {
    let mut statistics = ExecutionStatistics::default();
    let mut available_nodes = Vec::new();

    if let Some(run_data) = execution.run_data() {
        for (name, runs) in run_data.iter() {
            let first = runs.first();
            let status = first.map(|r| r.status()).unwrap_or(NodeStatus::Success);

            statistics.total_nodes += 1;
            statistics.executed_nodes += 1;
            match status {
                NodeStatus::Success => statistics.successful_nodes += 1,
                NodeStatus::Error => statistics.failed_nodes += 1,
            }
            statistics.total_items_processed += first.map_or(0, |r| r.first_branch_items().len());

            available_nodes.push(AvailableNode {
                node_name: name.to_string(),
                node_type: execution.node_type(name, first),
                status,
            });
        }
    }

    let guidance = guidance(&execution.id, available_nodes.first());

    ExecutionSummary {
        id: execution.id.clone(),
        workflow_id: execution.workflow_id.clone(),
        status: execution.normalized_status(),
        started_at: execution.started_at.clone(),
        stopped_at: execution.stopped_at.clone(),
        duration: execution.duration_ms(),
        statistics,
        available_nodes,
        guidance,
    }
}

fn guidance(execution_id: &str, first_node: Option<&AvailableNode>) -> Guidance {
    let node_name = first_node
        .map(|n| n.node_name.clone())
        .unwrap_or_else(|| FALLBACK_NODE_NAME.to_string());

    Guidance {
        message: "This is a summary. Call get_execution_by_node with a nodeName from \
                  availableNodes to load that node's input, output and parameters."
            .to_string(),
        example: GuidanceExample {
            tool: "get_execution_by_node".to_string(),
            id: execution_id.to_string(),
            node_name,
        },
    }
}
