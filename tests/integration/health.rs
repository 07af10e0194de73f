//! Health endpoint integration tests
//!
//! - GET /api/health - Health report
//! - GET /health/live - Liveness probe
//! - GET /metrics - Prometheus export

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestRelay;
use crate::mocks::MockOpenRouter;

#[tokio::test]
async fn test_health_reports_provider_and_auth() {
    let provider = MockOpenRouter::start().await;
    provider.expect_no_calls().await;
    let server = TestRelay::new(&provider).with_auth().server();

    let response = server.get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["provider"], "openrouter");
    assert_eq!(body["auth_enabled"], true);
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_in_mock_mode() {
    let provider = MockOpenRouter::start().await;
    let server = TestRelay::new(&provider)
        .with_var("RELAY_MOCK_RESPONSES", "1")
        .server();

    let body = server.get("/api/health").await.json::<Value>();

    assert_eq!(body["provider"], "mock");
    assert_eq!(body["auth_enabled"], false);
}

#[tokio::test]
async fn test_liveness() {
    let provider = MockOpenRouter::start().await;
    let server = TestRelay::new(&provider).server();

    let response = server.get("/health/live").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let provider = MockOpenRouter::start().await;
    let server = TestRelay::new(&provider).server();

    let response = server.get("/api/unknown").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
