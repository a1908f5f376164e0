//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_adapters::AdapterError;
use relay_core::CoreError;
use serde_json::json;

/// Errors that can occur during gateway request handling or startup.
///
/// Every variant renders as a generic 500: callers see no distinction
/// between a failed bridge, a failed upstream call, or a lost worker.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The bridged callback operation signalled failure.
    #[error(transparent)]
    Bridge(#[from] CoreError),

    /// A collaborator call failed.
    #[error(transparent)]
    Upstream(#[from] AdapterError),

    /// A job dispatched to the worker pool panicked or was aborted.
    #[error("worker task failed: {0}")]
    Worker(String),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": self.to_string()}))).into_response()
    }
}
