//! Workflow handler implementations

use mcp_common::{paginate, SizeGovernor};
use serde_json::{json, Map, Value};

use crate::api::{N8nClient, WorkflowListQuery};
use crate::error::{ToolError, ToolResult};
use crate::format::{workflow_view, Verbosity};
use crate::params::{CreateWorkflowParams, ListWorkflowsParams, UpdateWorkflowParams, WorkflowIdParams};

use super::{validate_limit, validate_offset, validate_workflow_id, ToolSuccess};

const DEFAULT_WORKFLOW_LIMIT: u32 = 50;
const MAX_WORKFLOW_LIMIT: u32 = 250;
/// Largest page the n8n API serves in one request
const UPSTREAM_PAGE_SIZE: u32 = 250;

/// List workflows, paginated locally over one upstream page
pub async fn list_workflows(
    client: &N8nClient,
    governor: &SizeGovernor,
    params: ListWorkflowsParams,
) -> ToolResult<ToolSuccess> {
    let limit = validate_limit(params.limit, DEFAULT_WORKFLOW_LIMIT, MAX_WORKFLOW_LIMIT)?;
    let offset = validate_offset(params.offset)?;
    let verbosity = Verbosity::from_raw_flag(params.raw);

    let query = WorkflowListQuery {
        active: params.active,
        tags: params.tags.filter(|t| !t.trim().is_empty()),
        limit: Some(UPSTREAM_PAGE_SIZE),
        cursor: None,
    };
    let response = client.list_workflows(&query).await?;

    let all: Vec<Value> = response
        .get("data")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(|item| workflow_view(item, verbosity)).collect())
        .unwrap_or_default();
    let page = paginate(all, limit as usize, offset);

    let message = format!(
        "Showing {} of {} workflows",
        page.items.len(),
        page.pagination.total
    );
    let data = json!({
        "workflows": governor.apply(Value::Array(page.items)),
        "pagination": page.pagination,
    });
    Ok(ToolSuccess::new(message, data))
}

pub async fn get_workflow(client: &N8nClient, params: WorkflowIdParams) -> ToolResult<ToolSuccess> {
    let id = validate_workflow_id(&params.id)?;
    let workflow = client
        .get_workflow(&id)
        .await
        .map_err(|e| ToolError::from(e).with_context("workflowId", id.as_str()))?;

    let name = workflow.get("name").and_then(Value::as_str).unwrap_or("unnamed");
    Ok(ToolSuccess::new(format!("Workflow '{}' ({})", name, id), workflow))
}

pub async fn create_workflow(client: &N8nClient, params: CreateWorkflowParams) -> ToolResult<ToolSuccess> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(ToolError::validation("Workflow name must not be empty"));
    }
    if !params.connections.is_object() {
        return Err(ToolError::validation("connections must be an object keyed by node name"));
    }

    let body = json!({
        "name": name,
        "nodes": params.nodes,
        "connections": params.connections,
        "settings": params.settings.unwrap_or_else(|| json!({})),
    });
    let created = client.create_workflow(body).await?;

    let id = match created.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    Ok(ToolSuccess::new(format!("Created workflow '{}' {}", name, id), created))
}

/// Fetch the current workflow, overlay the given fields and PUT it back
pub async fn update_workflow(client: &N8nClient, params: UpdateWorkflowParams) -> ToolResult<ToolSuccess> {
    let id = validate_workflow_id(&params.id)?;
    if params.name.is_none()
        && params.nodes.is_none()
        && params.connections.is_none()
        && params.settings.is_none()
    {
        return Err(ToolError::validation(
            "Nothing to update: provide name, nodes, connections or settings",
        )
        .with_context("workflowId", id.as_str()));
    }
    if let Some(name) = &params.name {
        if name.trim().is_empty() {
            return Err(ToolError::validation("Workflow name must not be empty"));
        }
    }

    let current = client
        .get_workflow(&id)
        .await
        .map_err(|e| ToolError::from(e).with_context("workflowId", id.as_str()))?;

    let mut body = Map::new();
    body.insert(
        "name".into(),
        params
            .name
            .map(Value::String)
            .unwrap_or_else(|| field_or(&current, "name", Value::Null)),
    );
    body.insert(
        "nodes".into(),
        params
            .nodes
            .map(Value::Array)
            .unwrap_or_else(|| field_or(&current, "nodes", json!([]))),
    );
    body.insert(
        "connections".into(),
        params
            .connections
            .unwrap_or_else(|| field_or(&current, "connections", json!({}))),
    );
    body.insert(
        "settings".into(),
        params
            .settings
            .unwrap_or_else(|| field_or(&current, "settings", json!({}))),
    );

    let updated = client.update_workflow(&id, Value::Object(body)).await?;
    Ok(ToolSuccess::new(format!("Updated workflow {}", id), updated))
}

pub async fn delete_workflow(client: &N8nClient, params: WorkflowIdParams) -> ToolResult<ToolSuccess> {
    let id = validate_workflow_id(&params.id)?;
    let deleted = client
        .delete_workflow(&id)
        .await
        .map_err(|e| ToolError::from(e).with_context("workflowId", id.as_str()))?;

    let data = if deleted.is_null() {
        json!({ "id": id, "deleted": true })
    } else {
        deleted
    };
    Ok(ToolSuccess::new(format!("Deleted workflow {}", id), data))
}

fn field_or(value: &Value, key: &str, default: Value) -> Value {
    value.get(key).cloned().unwrap_or(default)
}
