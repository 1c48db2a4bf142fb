//! Single-node drill-down formatter

use crate::types::{Execution, ItemSet, NodeExecutionData};

use super::MAX_NODE_ITEMS;

/// Full detail of one node's first run.
///
/// Returns `None` when the execution has no run data, the node is absent,
/// or the node has no runs. Output items are capped at [`MAX_NODE_ITEMS`].
/// The record carries no separate input set, so input mirrors the capped
/// output.
pub fn format_node_execution(execution: &Execution, node_name: &str) -> Option<NodeExecutionData> {
    let run = execution.run_data()?.first_run(node_name)?;

    let output = ItemSet::capped(run.first_branch_items(), MAX_NODE_ITEMS);
    let input = output.clone();

    Some(NodeExecutionData {
        execution_id: execution.id.clone(),
        node_name: node_name.to_string(),
        node_type: execution.node_type(node_name, Some(run)),
        status: run.status(),
        execution_time: run.execution_time,
        start_time: run.start_time,
        end_time: run.resolved_end_time(),
        parameters: execution.node_parameters(node_name, Some(run)),
        input,
        output,
        error: run.error.clone(),
    })
}
