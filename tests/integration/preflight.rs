//! Preflight and CORS integration tests

use axum::http::{header, HeaderValue, Method, StatusCode};
use serde_json::json;

use crate::common::TestRelay;
use crate::mocks::MockOpenRouter;

fn header_str(response: &axum_test::TestResponse, name: header::HeaderName) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[tokio::test]
async fn test_bare_options_advertises_methods_and_headers() {
    let provider = MockOpenRouter::start().await;
    provider.expect_no_calls().await;
    let server = TestRelay::new(&provider).with_auth().server();

    let response = server.method(Method::OPTIONS, "/api/chat").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS).contains("post"));
    assert!(header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS).contains("options"));
    assert!(header_str(&response, header::ACCESS_CONTROL_ALLOW_HEADERS).contains("api-key"));
    assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
}

#[tokio::test]
async fn test_browser_preflight_needs_no_credential() {
    let provider = MockOpenRouter::start().await;
    provider.expect_no_calls().await;
    let server = TestRelay::new(&provider).with_auth().server();

    let response = server
        .method(Method::OPTIONS, "/api/chat")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("content-type, api-key"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(header_str(&response, header::ACCESS_CONTROL_ALLOW_HEADERS).contains("api-key"));
}

#[tokio::test]
async fn test_chat_response_carries_cors_origin() {
    let provider = MockOpenRouter::start().await;
    provider.mock_answer("hello").await;
    let server = TestRelay::new(&provider).server();

    let response = server
        .post("/api/chat")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .json(&json!({"prompt": "Hi"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
}
