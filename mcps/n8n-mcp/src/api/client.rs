//! Retrying n8n API client
//!
//! Every call gets the same retry budget. A request is retried only when no
//! response arrived or the response was a 5xx; any other status is final.
//! The k-th retry waits `base_delay * 2^k` (2s, 4s, 8s with the defaults),
//! and the wait completes before the next attempt is sent.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::{ApiError, ApiResult};
use super::transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
use crate::config::N8nConfig;

/// Retry budget and backoff unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Wait before the `retry`-th retry (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry))
    }
}

/// Filters for `GET /executions`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionListQuery {
    pub workflow_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

/// Filters for `GET /workflows`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowListQuery {
    pub active: Option<bool>,
    pub tags: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

/// n8n API client with retry and error normalization
#[derive(Clone)]
pub struct N8nClient {
    transport: Arc<dyn HttpTransport>,
    retry: RetryPolicy,
}

impl N8nClient {
    pub fn new(transport: Arc<dyn HttpTransport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// Client over a reqwest transport built from configuration
    pub fn from_config(config: &N8nConfig) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), config.retry_policy()))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Send a request, retrying network failures and 5xx responses.
    ///
    /// Returns the decoded JSON body (`Null` for an empty body).
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<Value> {
        let mut retries: u32 = 0;

        loop {
            debug!(attempt = retries + 1, "sending n8n API request");

            let failure = match self.transport.send(&request).await {
                Ok(response) if response.is_success() => {
                    return decode_body(&response, &request.path);
                }
                Ok(response) => {
                    let error =
                        ApiError::from_status(response.status, response.json_body(), &request.path);
                    if !response.is_server_error() {
                        debug!(status = response.status, "non-retryable response");
                        return Err(error);
                    }
                    error
                }
                Err(err) => ApiError::from_transport(&err, &request.path),
            };

            if retries >= self.retry.max_retries {
                warn!(
                    retries,
                    status = ?failure.status,
                    "retry budget exhausted"
                );
                return Err(failure);
            }

            retries += 1;
            let delay = self.retry.delay_for(retries);
            warn!(
                retry = retries,
                max_retries = self.retry.max_retries,
                delay_ms = delay.as_millis() as u64,
                status = ?failure.status,
                error = %failure.message,
                "n8n API request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    // ========================================================================
    // Executions
    // ========================================================================

    pub async fn list_executions(&self, query: &ExecutionListQuery) -> ApiResult<Value> {
        let mut request = ApiRequest::get("/executions");
        if let Some(workflow_id) = &query.workflow_id {
            request = request.with_query("workflowId", workflow_id.as_str());
        }
        if let Some(status) = &query.status {
            request = request.with_query("status", status.as_str());
        }
        if let Some(limit) = query.limit {
            request = request.with_query("limit", limit.to_string());
        }
        if let Some(cursor) = &query.cursor {
            request = request.with_query("cursor", cursor.as_str());
        }
        self.execute(request).await
    }

    pub async fn get_execution(&self, id: &str, include_data: bool) -> ApiResult<Value> {
        let request = ApiRequest::get(format!("/executions/{}", id))
            .with_query("includeData", include_data.to_string());
        self.execute(request).await
    }

    // ========================================================================
    // Workflows
    // ========================================================================

    pub async fn list_workflows(&self, query: &WorkflowListQuery) -> ApiResult<Value> {
        let mut request = ApiRequest::get("/workflows");
        if let Some(active) = query.active {
            request = request.with_query("active", active.to_string());
        }
        if let Some(tags) = &query.tags {
            request = request.with_query("tags", tags.as_str());
        }
        if let Some(limit) = query.limit {
            request = request.with_query("limit", limit.to_string());
        }
        if let Some(cursor) = &query.cursor {
            request = request.with_query("cursor", cursor.as_str());
        }
        self.execute(request).await
    }

    pub async fn get_workflow(&self, id: &str) -> ApiResult<Value> {
        self.execute(ApiRequest::get(format!("/workflows/{}", id)))
            .await
    }

    pub async fn create_workflow(&self, workflow: Value) -> ApiResult<Value> {
        self.execute(ApiRequest::post("/workflows", workflow)).await
    }

    pub async fn update_workflow(&self, id: &str, workflow: Value) -> ApiResult<Value> {
        self.execute(ApiRequest::put(format!("/workflows/{}", id), workflow))
            .await
    }

    pub async fn delete_workflow(&self, id: &str) -> ApiResult<Value> {
        self.execute(ApiRequest::delete(format!("/workflows/{}", id)))
            .await
    }
}

fn decode_body(response: &ApiResponse, path: &str) -> ApiResult<Value> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::invalid_body(path, &e))
}
