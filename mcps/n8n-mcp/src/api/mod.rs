//! n8n REST API access
//!
//! [`HttpTransport`] sends single requests; [`N8nClient`] layers retry with
//! exponential backoff on top and normalizes every failure into [`ApiError`].
//! Nothing here knows what a workflow or execution means beyond the paths.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ExecutionListQuery, N8nClient, RetryPolicy, WorkflowListQuery};
pub use error::{ApiError, TransportError};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
