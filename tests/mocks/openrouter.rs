//! Mock OpenRouter provider for testing
//!
//! Provides wiremock-based mocks for `POST /api/v1/chat/completions`.
//!
//! # Example
//!
//! ```rust,ignore
//! let provider = MockOpenRouter::start().await;
//! provider.mock_answer("Hi there").await;
//! // Use provider.base_url() as OPENROUTER_API_URL
//! ```

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Provider credential the relay is configured with in tests
pub const TEST_PROVIDER_KEY: &str = "sk-or-test-provider-key";

/// Path of the chat completions endpoint under the mock server
pub const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

/// Mock OpenRouter server wrapper
pub struct MockOpenRouter {
    server: MockServer,
}

impl MockOpenRouter {
    /// Start a new mock provider
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure as `OPENROUTER_API_URL`
    pub fn base_url(&self) -> String {
        format!("{}/api/v1", self.server.uri())
    }

    /// Requests received so far
    pub async fn received(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Bodies of received requests, parsed as JSON
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.received()
            .await
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
            .collect()
    }

    /// Successful completion with a single choice
    pub async fn mock_answer(&self, content: &str) {
        self.mock_envelope(200, completion_envelope(content)).await;
    }

    /// Arbitrary JSON envelope with the given status
    pub async fn mock_envelope(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("Authorization", format!("Bearer {}", TEST_PROVIDER_KEY).as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Plain-text error body with the given status
    pub async fn mock_error(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Successful answer delivered only after `delay`
    pub async fn mock_slow_answer(&self, content: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_envelope(content))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Fail verification if the provider is called at all
    pub async fn expect_no_calls(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}

/// OpenAI-compatible completion envelope with one choice
pub fn completion_envelope(content: &str) -> Value {
    json!({
        "id": "gen-test-123",
        "object": "chat.completion",
        "created": 1706745600,
        "model": "mistralai/mistral-7b-instruct:free",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_answer_requires_provider_key() {
        let mock = MockOpenRouter::start().await;
        mock.mock_answer("Hi").await;

        let client = reqwest::Client::new();
        let url = format!("{}/chat/completions", mock.base_url());

        let unauthorized = client.post(&url).json(&json!({})).send().await.unwrap();
        assert_eq!(unauthorized.status(), 404);

        let ok = client
            .post(&url)
            .bearer_auth(TEST_PROVIDER_KEY)
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(ok.status(), 200);
        let body: Value = ok.json().await.unwrap();
        assert_eq!(body["choices"][0]["message"]["content"], "Hi");
    }

    #[tokio::test]
    async fn test_mock_error_returns_body() {
        let mock = MockOpenRouter::start().await;
        mock.mock_error(429, "rate limited").await;

        let response = reqwest::Client::new()
            .post(format!("{}/chat/completions", mock.base_url()))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 429);
        assert_eq!(response.text().await.unwrap(), "rate limited");
    }
}
