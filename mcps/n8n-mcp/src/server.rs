//! MCP Server implementation
//!
//! Exposes progressive execution loading (`get_execution` summary first,
//! then `get_execution_by_node` per node) plus execution listing and
//! workflow management. Handler implementations are in the handlers/
//! module; every tool answers with the response envelope, in-band.

use mcp_common::{async_trait, parse_arguments, DispatchError, DispatchResult, SizeGovernor, ToolDispatch};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde_json::Value;

use crate::api::N8nClient;
use crate::config::Config;
use crate::handlers::{self, respond};
use crate::params::*;

const INSTRUCTIONS: &str = "n8n MCP Server - inspect workflow executions progressively. \
    Call get_execution for a compact summary listing the executed nodes, then \
    get_execution_by_node for one node's input, output and parameters. \
    list_executions and the workflow tools cover discovery and management.";

/// The main n8n MCP Server
#[derive(Clone)]
pub struct N8nMcpServer {
    client: N8nClient,
    governor: SizeGovernor,
    tool_router: ToolRouter<Self>,
}

impl N8nMcpServer {
    /// Server talking to the n8n instance named in `config`
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = N8nClient::from_config(&config.n8n)?;
        Ok(Self::with_client(client, SizeGovernor::new(config.response.max_chars)))
    }

    pub fn with_client(client: N8nClient, governor: SizeGovernor) -> Self {
        Self {
            client,
            governor,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Execution Tools
// ============================================================================

#[tool_router]
impl N8nMcpServer {
    #[tool(
        description = "Get a compact summary of a workflow execution: status, timing, node statistics and the list of executed nodes. Use get_execution_by_node to load a single node's data."
    )]
    async fn get_execution(
        &self,
        Parameters(params): Parameters<GetExecutionParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = handlers::get_execution(&self.client, params).await;
        Ok(respond("get_execution", &self.governor, outcome))
    }

    #[tool(
        description = "Get one node's full execution detail (input, output capped at 50 items, parameters, error) from a workflow execution"
    )]
    async fn get_execution_by_node(
        &self,
        Parameters(params): Parameters<GetExecutionByNodeParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = handlers::get_execution_by_node(&self.client, params).await;
        Ok(respond("get_execution_by_node", &self.governor, outcome))
    }

    #[tool(
        description = "List workflow executions, optionally filtered by workflow and status. Supports cursor pagination"
    )]
    async fn list_executions(
        &self,
        Parameters(params): Parameters<ListExecutionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = handlers::list_executions(&self.client, &self.governor, params).await;
        Ok(respond("list_executions", &self.governor, outcome))
    }

    // ========================================================================
    // Workflow Tools
    // ========================================================================

    #[tool(description = "List workflows with optional active/tag filters and limit/offset pagination")]
    async fn list_workflows(
        &self,
        Parameters(params): Parameters<ListWorkflowsParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = handlers::list_workflows(&self.client, &self.governor, params).await;
        Ok(respond("list_workflows", &self.governor, outcome))
    }

    #[tool(description = "Get a workflow definition by ID")]
    async fn get_workflow(
        &self,
        Parameters(params): Parameters<WorkflowIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = handlers::get_workflow(&self.client, params).await;
        Ok(respond("get_workflow", &self.governor, outcome))
    }

    #[tool(description = "Create a workflow from a name, nodes and connections")]
    async fn create_workflow(
        &self,
        Parameters(params): Parameters<CreateWorkflowParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = handlers::create_workflow(&self.client, params).await;
        Ok(respond("create_workflow", &self.governor, outcome))
    }

    #[tool(
        description = "Update a workflow. Only the given fields change; the rest are taken from the current definition"
    )]
    async fn update_workflow(
        &self,
        Parameters(params): Parameters<UpdateWorkflowParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = handlers::update_workflow(&self.client, params).await;
        Ok(respond("update_workflow", &self.governor, outcome))
    }

    #[tool(description = "Delete a workflow by ID")]
    async fn delete_workflow(
        &self,
        Parameters(params): Parameters<WorkflowIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = handlers::delete_workflow(&self.client, params).await;
        Ok(respond("delete_workflow", &self.governor, outcome))
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for N8nMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// ToolDispatch Implementation
// ============================================================================

#[async_trait]
impl ToolDispatch for N8nMcpServer {
    fn server_name(&self) -> &str {
        "n8n"
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, args: Value) -> DispatchResult<CallToolResult> {
        let result = match name {
            "get_execution" => {
                self.get_execution(Parameters(parse_arguments(name, args)?))
                    .await
            }
            "get_execution_by_node" => {
                self.get_execution_by_node(Parameters(parse_arguments(name, args)?))
                    .await
            }
            "list_executions" => {
                self.list_executions(Parameters(parse_arguments(name, args)?))
                    .await
            }
            "list_workflows" => {
                self.list_workflows(Parameters(parse_arguments(name, args)?))
                    .await
            }
            "get_workflow" => self.get_workflow(Parameters(parse_arguments(name, args)?)).await,
            "create_workflow" => {
                self.create_workflow(Parameters(parse_arguments(name, args)?))
                    .await
            }
            "update_workflow" => {
                self.update_workflow(Parameters(parse_arguments(name, args)?))
                    .await
            }
            "delete_workflow" => {
                self.delete_workflow(Parameters(parse_arguments(name, args)?))
                    .await
            }
            _ => return Err(DispatchError::ToolNotFound(name.to_string())),
        };
        result.map_err(Into::into)
    }
}
