//! AI provider abstraction layer
//!
//! Defines the trait interface for the upstream chat completion service so the
//! orchestrator can run against OpenRouter, the local mock, or a test double.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use super::types::UpstreamRequest;

/// Transport-level failure of the single upstream attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamFailure {
    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream network failure: {0}")]
    Network(String),

    #[error("upstream returned status {status}")]
    NonSuccessStatus { status: u16, body: String },
}

/// Trait defining the interface for chat completion providers
///
/// # Security
///
/// Implementations MUST:
/// - Authenticate with their own provider credential, never the caller's
/// - Never forward caller headers upstream
/// - Make exactly one attempt per call (no retries)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for logging and health output
    fn name(&self) -> &'static str;

    /// Perform one chat completion call, returning the raw success body
    async fn chat_completion(&self, request: &UpstreamRequest) -> Result<Bytes, UpstreamFailure>;
}
