//! n8n MCP Server
//!
//! Progressive execution loading for n8n over MCP stdio.
//!
//! # Configuration
//! Set `N8N_API_URL` and `N8N_API_KEY`, or configure `~/.n8n-mcp/config.toml`

use n8n_mcp::{Config, N8nMcpServer};
use rmcp::{transport::stdio, ServiceExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    mcp_common::init_tracing(&config.log_settings())?;

    tracing::info!("Starting n8n MCP Server");
    tracing::info!("n8n API: {}", config.n8n.display_url());

    let server = N8nMcpServer::new(&config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
