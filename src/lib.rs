//! Chat relay - authenticated chat-completion proxy
//!
//! Accepts a prompt or a role-tagged conversation, authenticates the caller,
//! forwards the conversation to an LLM provider and returns either an answer
//! or a normalized error.

pub mod auth;
pub mod config;
pub mod conversation;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod proxy;
pub mod request;
pub mod response;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

pub use crate::auth::CredentialVerifier;
pub use crate::config::Config;
pub use crate::error::ProxyError;
pub use crate::orchestrator::Orchestrator;
pub use crate::proxy::{ChatProvider, MockProvider, OpenRouterProvider};
pub use crate::response::ProxyResponse;

/// Application state shared across all request handlers
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        let provider: Arc<dyn ChatProvider> = if config.mock_responses {
            info!("Mock responses enabled, the upstream provider will not be called");
            Arc::new(MockProvider::new())
        } else {
            let http_client = reqwest::Client::builder()
                .pool_max_idle_per_host(32)
                .timeout(config.upstream_timeout)
                .build()?;
            Arc::new(OpenRouterProvider::new(http_client, &config)?)
        };

        Ok(Self::with_provider(&config, provider))
    }

    /// Create application state around an explicit provider
    pub fn with_provider(config: &Config, provider: Arc<dyn ChatProvider>) -> Self {
        let orchestrator = Orchestrator::new(
            CredentialVerifier::new(config.api_key.as_deref()),
            provider,
            config.generation.clone(),
            config.upstream_timeout,
        );

        Self {
            orchestrator,
            start_time: Instant::now(),
        }
    }
}
