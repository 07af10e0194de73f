//! Error types for the chat relay
//!
//! Every stage of the request lifecycle reports failure as a [`ProxyError`].
//! The orchestrator maps each kind onto a fixed HTTP status and a
//! caller-facing message; nothing else escapes to the client.

use axum::http::StatusCode;
use thiserror::Error;

/// Maximum number of characters of a provider error body kept in messages and logs
pub const UPSTREAM_EXCERPT_LIMIT: usize = 200;

/// Request-path errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    #[error("{0}")]
    InvalidInput(String),

    /// Deliberately carries no detail: a missing header and a wrong key look the same.
    #[error("Invalid API key")]
    Unauthorized,

    #[error("Upstream request timed out")]
    UpstreamTimeout,

    #[error("Upstream provider unreachable")]
    UpstreamNetworkFailure(String),

    #[error("Upstream provider error ({status}): {excerpt}")]
    UpstreamError { status: u16, excerpt: String },

    #[error("Upstream provider returned an unexpected response")]
    UpstreamFormatError(String),

    #[error("Internal server error")]
    InternalFault(String),
}

impl ProxyError {
    /// Build an `UpstreamError`, truncating the provider body
    pub fn upstream(status: u16, body: &str) -> Self {
        ProxyError::UpstreamError {
            status,
            excerpt: excerpt(body),
        }
    }

    /// HTTP status returned to the caller
    ///
    /// Provider statuses 429 and 503 pass through since callers act on them
    /// differently; every other provider failure surfaces as 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ProxyError::Unauthorized => StatusCode::UNAUTHORIZED,
            ProxyError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UpstreamError { status, .. } => match *status {
                429 => StatusCode::TOO_MANY_REQUESTS,
                503 => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ProxyError::UpstreamNetworkFailure(_)
            | ProxyError::UpstreamFormatError(_)
            | ProxyError::InternalFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::InvalidInput(_) => "invalid_input",
            ProxyError::Unauthorized => "unauthorized",
            ProxyError::UpstreamTimeout => "upstream_timeout",
            ProxyError::UpstreamNetworkFailure(_) => "upstream_network_failure",
            ProxyError::UpstreamError { .. } => "upstream_error",
            ProxyError::UpstreamFormatError(_) => "upstream_format_error",
            ProxyError::InternalFault(_) => "internal_fault",
        }
    }

    /// Detail kept for server-side logs only
    pub fn detail(&self) -> Option<&str> {
        match self {
            ProxyError::UpstreamNetworkFailure(detail)
            | ProxyError::UpstreamFormatError(detail)
            | ProxyError::InternalFault(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Truncate a provider body to [`UPSTREAM_EXCERPT_LIMIT`] characters
pub fn excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(UPSTREAM_EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Result type alias for convenience
pub type ProxyResult<T> = Result<T, ProxyError>;
