//! OpenRouter provider
//!
//! Forwards chat completion requests to an OpenAI-compatible
//! `/chat/completions` endpoint (OpenRouter by default).

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use tracing::{debug, instrument, warn};

use super::headers::build_default_headers;
use super::provider::{ChatProvider, UpstreamFailure};
use super::types::UpstreamRequest;
use crate::config::Config;
use crate::metrics::record_upstream_status;

/// OpenRouter chat completions client
pub struct OpenRouterProvider {
    client: reqwest::Client,
    url: String,
    headers: HeaderMap,
    timeout: Duration,
}

impl OpenRouterProvider {
    /// Create a new provider from configuration
    pub fn new(client: reqwest::Client, config: &Config) -> Result<Self> {
        let api_key = config
            .provider_api_key
            .as_deref()
            .context("OPENROUTER_API_KEY is not configured")?;

        Ok(Self {
            client,
            url: format!("{}/chat/completions", config.provider_api_url),
            headers: build_default_headers(
                api_key,
                config.app_url.as_deref(),
                config.app_title.as_deref(),
            )?,
            timeout: config.upstream_timeout,
        })
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    #[instrument(skip_all, fields(model = %request.model, messages = request.messages.len()))]
    async fn chat_completion(&self, request: &UpstreamRequest) -> Result<Bytes, UpstreamFailure> {
        debug!(url = %self.url, "Sending chat completion to provider");

        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        record_upstream_status(status.as_u16());
        debug!(status = %status, "Received provider response");

        let body = response.bytes().await.map_err(classify)?;

        if !status.is_success() {
            return Err(UpstreamFailure::NonSuccessStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }
}

/// Map a reqwest error onto the transport failure kinds
fn classify(err: reqwest::Error) -> UpstreamFailure {
    if err.is_timeout() {
        warn!("Provider request timed out");
        UpstreamFailure::Timeout
    } else {
        // without_url keeps the provider endpoint out of caller-visible detail
        let err = err.without_url();
        warn!(error = %err, "Provider request failed");
        UpstreamFailure::Network(err.to_string())
    }
}
