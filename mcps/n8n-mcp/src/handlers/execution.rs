//! Execution handler implementations

use mcp_common::SizeGovernor;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::{ExecutionListQuery, N8nClient};
use crate::error::{ToolError, ToolResult};
use crate::format::{execution_view, format_node_execution, format_summary, Verbosity};
use crate::params::{GetExecutionByNodeParams, GetExecutionParams, ListExecutionsParams};
use crate::types::Execution;

use super::{validate_execution_id, validate_limit, validate_node_name, validate_status, ToolSuccess};

const DEFAULT_EXECUTION_LIMIT: u32 = 20;
const MAX_EXECUTION_LIMIT: u32 = 100;

/// Fetch an execution with full data and parse it
async fn fetch_execution(client: &N8nClient, id: &str) -> ToolResult<Execution> {
    let raw = client
        .get_execution(id, true)
        .await
        .map_err(|e| ToolError::from(e).with_context("executionId", id))?;
    let execution = serde_json::from_value(raw)?;
    Ok(execution)
}

/// Summary of one execution with the index of its nodes
pub async fn get_execution(client: &N8nClient, params: GetExecutionParams) -> ToolResult<ToolSuccess> {
    let id = validate_execution_id(&params.id)?;
    let execution = fetch_execution(client, &id).await?;
    let summary = format_summary(&execution);

    let message = format!(
        "Execution {} is {} ({} nodes executed). Use get_execution_by_node for node details.",
        summary.id, summary.status, summary.statistics.executed_nodes
    );
    Ok(ToolSuccess::new(message, serde_json::to_value(&summary)?))
}

/// Full detail of one node inside one execution
pub async fn get_execution_by_node(
    client: &N8nClient,
    params: GetExecutionByNodeParams,
) -> ToolResult<ToolSuccess> {
    let id = validate_execution_id(&params.id)?;
    let node_name = validate_node_name(&params.node_name)?;
    let execution = fetch_execution(client, &id).await?;

    let Some(node) = format_node_execution(&execution, node_name) else {
        let available: Vec<&str> = execution
            .run_data()
            .map(|r| r.node_names().collect())
            .unwrap_or_default();
        return Err(ToolError::not_found(format!(
            "Node '{}' not found in execution '{}'",
            node_name, id
        ))
        .with_context("executionId", id.as_str())
        .with_context("nodeName", node_name)
        .with_context("availableNodes", json!(available)));
    };

    let message = format!(
        "Node '{}' ({}) in execution {}: {} of {} output items",
        node.node_name,
        node.node_type,
        node.execution_id,
        node.output.items.len(),
        node.output.total_items
    );
    Ok(ToolSuccess::new(message, serde_json::to_value(&node)?))
}

/// One upstream page of executions
pub async fn list_executions(
    client: &N8nClient,
    governor: &SizeGovernor,
    params: ListExecutionsParams,
) -> ToolResult<ToolSuccess> {
    let limit = validate_limit(params.limit, DEFAULT_EXECUTION_LIMIT, MAX_EXECUTION_LIMIT)?;
    let status = validate_status(params.status.as_deref())?;
    let verbosity = Verbosity::from_raw_flag(params.raw);

    let query = ExecutionListQuery {
        workflow_id: params.workflow_id.filter(|w| !w.trim().is_empty()),
        status: status.map(|s| s.as_str().to_string()),
        limit: Some(limit),
        cursor: params.cursor.filter(|c| !c.is_empty()),
    };
    let response = client.list_executions(&query).await?;

    let items: Vec<Value> = response
        .get("data")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(|item| execution_view(item, verbosity)).collect())
        .unwrap_or_default();
    let next_cursor = response
        .get("nextCursor")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let executions = governor.apply(Value::Array(items));
    let count = executions.as_array().map_or(0, Vec::len);
    debug!(count, has_more = next_cursor.is_some(), "listed executions");

    let data = json!({
        "executions": executions,
        "count": count,
        "nextCursor": next_cursor,
        "hasMore": next_cursor.is_some(),
    });
    Ok(ToolSuccess::new(format!("Found {} executions", count), data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use crate::api::{ApiResponse, RetryPolicy};
    use crate::params::IdParam;
    use std::sync::Arc;

    fn client(transport: &Arc<ScriptedTransport>) -> N8nClient {
        N8nClient::new(transport.clone(), RetryPolicy::new(0, std::time::Duration::ZERO))
    }

    fn upstream_execution() -> Value {
        json!({
            "id": "12345",
            "workflowId": "wf-1",
            "status": "success",
            "startedAt": "2025-10-29T10:00:00.000Z",
            "stoppedAt": "2025-10-29T10:00:01.000Z",
            "data": { "resultData": { "runData": {
                "Start": [{ "data": { "main": [[{ "json": {} }]] } }],
                "HTTP Request": [{ "data": { "main": [[{ "json": { "ok": true } }]] } }]
            }}}
        })
    }

    #[tokio::test]
    async fn test_get_execution_summary() {
        let transport = Arc::new(ScriptedTransport::ok(upstream_execution()));
        let success = get_execution(&client(&transport), GetExecutionParams { id: "12345".into() })
            .await
            .unwrap();

        assert_eq!(success.data["statistics"]["totalNodes"], 2);
        assert_eq!(success.data["statistics"]["totalItemsProcessed"], 2);
        assert!(success.message.contains("12345"));
        assert_eq!(transport.requests()[0].query_value("includeData"), Some("true"));
    }

    #[tokio::test]
    async fn test_invalid_id_makes_no_request() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let err = get_execution(&client(&transport), GetExecutionParams { id: "abc".into() })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_not_found() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(ApiResponse::json(
            404,
            &json!({ "message": "Not Found" }),
        ))]));
        let err = get_execution(&client(&transport), GetExecutionParams { id: "9".into() })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.context()["executionId"], "9");
    }

    #[tokio::test]
    async fn test_missing_node_is_not_found() {
        let transport = Arc::new(ScriptedTransport::ok(upstream_execution()));
        let params = GetExecutionByNodeParams {
            id: "12345".into(),
            node_name: "Foo".to_string(),
        };
        let err = get_execution_by_node(&client(&transport), params)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Node 'Foo' not found in execution '12345'");
        assert_eq!(err.context()["availableNodes"], json!(["Start", "HTTP Request"]));
    }

    #[tokio::test]
    async fn test_node_detail() {
        let transport = Arc::new(ScriptedTransport::ok(upstream_execution()));
        let params = GetExecutionByNodeParams {
            id: IdParam::Number(12345),
            node_name: "HTTP Request".to_string(),
        };
        let success = get_execution_by_node(&client(&transport), params)
            .await
            .unwrap();

        assert_eq!(success.data["nodeName"], "HTTP Request");
        assert_eq!(success.data["output"]["items"][0]["json"]["ok"], true);
        assert!(success.data["error"].is_null());
    }

    #[tokio::test]
    async fn test_list_executions_minimal() {
        let transport = Arc::new(ScriptedTransport::ok(json!({
            "data": [
                { "id": 2, "workflowId": "wf-1", "status": "success", "mode": "trigger" },
                { "id": 1, "workflowId": "wf-1", "status": "crashed", "mode": "manual" }
            ],
            "nextCursor": "MTIz"
        })));
        let params = ListExecutionsParams {
            workflow_id: Some("wf-1".into()),
            ..Default::default()
        };
        let success = list_executions(&client(&transport), &SizeGovernor::default(), params)
            .await
            .unwrap();

        assert_eq!(success.data["count"], 2);
        assert_eq!(success.data["hasMore"], true);
        assert_eq!(success.data["nextCursor"], "MTIz");
        assert_eq!(success.data["executions"][1]["status"], "error");

        let request = &transport.requests()[0];
        assert_eq!(request.query_value("limit"), Some("20"));
        assert_eq!(request.query_value("workflowId"), Some("wf-1"));
    }

    #[tokio::test]
    async fn test_list_executions_rejects_bad_input() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let c = client(&transport);

        let over = ListExecutionsParams {
            limit: Some(101),
            ..Default::default()
        };
        let err = list_executions(&c, &SizeGovernor::default(), over).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let bad_status = ListExecutionsParams {
            status: Some("crashed".into()),
            ..Default::default()
        };
        let err = list_executions(&c, &SizeGovernor::default(), bad_status)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(transport.requests().is_empty());
    }
}
