//! Parameter types for n8n MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An identifier accepted as either a JSON string or a JSON number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IdParam {
    Text(String),
    Number(u64),
}

impl fmt::Display for IdParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdParam::Text(s) => f.write_str(s),
            IdParam::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for IdParam {
    fn from(value: &str) -> Self {
        IdParam::Text(value.to_string())
    }
}

// ============================================================================
// Executions
// ============================================================================

/// Parameters for get_execution
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetExecutionParams {
    #[schemars(description = "Execution ID (numeric string, e.g. '12345')")]
    pub id: IdParam,
}

/// Parameters for get_execution_by_node
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetExecutionByNodeParams {
    #[schemars(description = "Execution ID (numeric string, e.g. '12345')")]
    pub id: IdParam,

    #[schemars(description = "Node name exactly as listed in availableNodes of get_execution")]
    pub node_name: String,
}

/// Parameters for list_executions
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListExecutionsParams {
    #[schemars(description = "Only executions of this workflow")]
    pub workflow_id: Option<String>,

    #[schemars(description = "Filter by status: success, error, waiting, running or canceled")]
    pub status: Option<String>,

    #[schemars(description = "Maximum executions to return (1-100, default 20)")]
    pub limit: Option<i64>,

    #[schemars(description = "Cursor from a previous response's nextCursor")]
    pub cursor: Option<String>,

    #[schemars(description = "Return full upstream records instead of the minimal view")]
    pub raw: Option<bool>,
}

// ============================================================================
// Workflows
// ============================================================================

/// Parameters for list_workflows
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListWorkflowsParams {
    #[schemars(description = "Only active (true) or inactive (false) workflows")]
    pub active: Option<bool>,

    #[schemars(description = "Comma-separated tag names")]
    pub tags: Option<String>,

    #[schemars(description = "Page size (1-250, default 50)")]
    pub limit: Option<i64>,

    #[schemars(description = "Number of workflows to skip (default 0)")]
    pub offset: Option<i64>,

    #[schemars(description = "Return full upstream records instead of the minimal view")]
    pub raw: Option<bool>,
}

/// Parameters for tools addressing one workflow
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkflowIdParams {
    #[schemars(description = "Workflow ID")]
    pub id: IdParam,
}

/// Parameters for create_workflow
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateWorkflowParams {
    #[schemars(description = "Workflow name")]
    pub name: String,

    #[schemars(description = "Node definitions (n8n workflow JSON format)")]
    pub nodes: Vec<Value>,

    #[schemars(description = "Connections between nodes, keyed by source node name")]
    pub connections: Value,

    #[schemars(description = "Workflow settings (defaults to an empty object)")]
    pub settings: Option<Value>,
}

/// Parameters for update_workflow
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateWorkflowParams {
    #[schemars(description = "Workflow ID")]
    pub id: IdParam,

    #[schemars(description = "New workflow name")]
    pub name: Option<String>,

    #[schemars(description = "Replacement node definitions")]
    pub nodes: Option<Vec<Value>>,

    #[schemars(description = "Replacement connections")]
    pub connections: Option<Value>,

    #[schemars(description = "Replacement settings")]
    pub settings: Option<Value>,
}
