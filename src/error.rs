//! Error types for the match proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the match proxy.
///
/// Upstream variants carry the underlying failure detail for logging;
/// only a generic message ever reaches the client.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Upstream request failed (network error, timeout, or non-2xx status)
    #[error("upstream request failed: {0}")]
    UpstreamUnreachable(String),

    /// Upstream body did not parse as the expected document shape
    #[error("upstream returned malformed payload: {0}")]
    UpstreamMalformed(String),

    /// No API key was supplied on a key-gated endpoint
    #[error("API key required")]
    ApiKeyMissing,

    /// The supplied API key is not in the accepted set
    #[error("Invalid API key")]
    ApiKeyInvalid,

    /// A cached document failed to serialize for encoding
    #[error("failed to encode payload: {0}")]
    Encoding(String),
}

impl ProxyError {
    /// Message safe to expose to clients. Upstream detail stays in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            ProxyError::UpstreamUnreachable(_) | ProxyError::UpstreamMalformed(_) => {
                "Failed to fetch matches data"
            }
            ProxyError::ApiKeyMissing => "API key required",
            ProxyError::ApiKeyInvalid => "Invalid API key",
            ProxyError::Encoding(_) => "Failed to encode matches data",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = self.client_message();
        let (status, body) = match &self {
            ProxyError::ApiKeyMissing | ProxyError::ApiKeyInvalid => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": message
                })),
            ),
            ProxyError::UpstreamUnreachable(_)
            | ProxyError::UpstreamMalformed(_)
            | ProxyError::Encoding(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": message,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            ),
        };

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the match proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
