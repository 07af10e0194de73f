//! Configuration management for the chat relay
//!
//! Configuration is loaded from environment variables once at startup and is
//! never re-read while serving requests.

use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::proxy::GenerationParams;

/// Caller key value that marks authentication as disabled for development
pub const DEV_PLACEHOLDER_KEY: &str = "default-key";

/// Hard upper bound on the upstream wait
pub const MAX_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Persona sent as the leading system message of every upstream request
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are the Braindump assistant, a friendly brainstorming partner \
that lives next to the user's idea canvas. Help the user explore, connect and organize their ideas. \
Keep answers short, concrete and encouraging.";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Caller-facing API key; `None` disables caller authentication
    pub api_key: Option<String>,

    /// Provider base URL
    pub provider_api_url: String,
    /// Provider API key (absent only in mock mode)
    pub provider_api_key: Option<String>,
    /// Sent as `HTTP-Referer` to the provider
    pub app_url: Option<String>,
    /// Sent as `X-Title` to the provider
    pub app_title: Option<String>,

    /// Fixed generation parameters and system directive
    pub generation: GenerationParams,

    /// Bound on the single upstream call
    pub upstream_timeout: Duration,

    /// Serve canned answers instead of calling the provider
    pub mock_responses: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mock_responses = var("RELAY_MOCK_RESPONSES")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let provider_api_key = var("OPENROUTER_API_KEY");
        if provider_api_key.is_none() && !mock_responses {
            bail!("OPENROUTER_API_KEY must be set (or enable RELAY_MOCK_RESPONSES)");
        }

        let api_key = var("RELAY_API_KEY").filter(|k| k != DEV_PLACEHOLDER_KEY);

        let temperature: f64 = var("RELAY_TEMPERATURE")
            .unwrap_or_else(|| "0.7".to_string())
            .parse()
            .context("Invalid RELAY_TEMPERATURE")?;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("RELAY_TEMPERATURE must be between 0.0 and 2.0");
        }

        let timeout_secs: u64 = var("RELAY_UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|| MAX_UPSTREAM_TIMEOUT_SECS.to_string())
            .parse()
            .context("Invalid RELAY_UPSTREAM_TIMEOUT_SECS")?;
        if timeout_secs == 0 || timeout_secs > MAX_UPSTREAM_TIMEOUT_SECS {
            bail!(
                "RELAY_UPSTREAM_TIMEOUT_SECS must be between 1 and {}",
                MAX_UPSTREAM_TIMEOUT_SECS
            );
        }

        Ok(Self {
            host: var("RELAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("RELAY_PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .context("Invalid RELAY_PORT")?,

            api_key,

            provider_api_url: var("OPENROUTER_API_URL")
                .unwrap_or_else(|| "https://openrouter.ai/api/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            provider_api_key,
            app_url: var("RELAY_APP_URL"),
            app_title: Some(var("RELAY_APP_TITLE").unwrap_or_else(|| "Braindump Chat".to_string())),

            generation: GenerationParams {
                model: var("RELAY_MODEL")
                    .unwrap_or_else(|| "mistralai/mistral-7b-instruct:free".to_string()),
                max_tokens: var("RELAY_MAX_TOKENS")
                    .unwrap_or_else(|| "150".to_string())
                    .parse()
                    .context("Invalid RELAY_MAX_TOKENS")?,
                temperature,
                system_prompt: var("RELAY_SYSTEM_PROMPT")
                    .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            },

            upstream_timeout: Duration::from_secs(timeout_secs),

            mock_responses,
        })
    }

    /// Whether callers must present the API key
    pub fn auth_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    ["true", "1", "yes", "on"]
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(secret: &Option<String>) -> &'static str {
            if secret.is_some() {
                "<redacted>"
            } else {
                "<unset>"
            }
        }

        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &redact(&self.api_key))
            .field("provider_api_url", &self.provider_api_url)
            .field("provider_api_key", &redact(&self.provider_api_key))
            .field("app_url", &self.app_url)
            .field("app_title", &self.app_title)
            .field("generation", &self.generation)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("mock_responses", &self.mock_responses)
            .finish()
    }
}
