//! Chat endpoint
//!
//! `POST /api/chat` accepts `{"prompt": "..."}` or `{"messages": [...]}` and
//! answers `{"answer": "..."}` or `{"error": "..."}`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{auth::extract_api_key, error::ProxyError, AppState};

/// Handle chat requests
///
/// The body is taken as raw bytes so malformed JSON is reported through the
/// relay's own error shape rather than axum's extractor rejection. A body
/// that fails to buffer is handed over as an error for the same reason.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = body.map_err(body_rejection);
    let body = body.as_ref().map(|bytes| &bytes[..]).map_err(Clone::clone);

    state
        .orchestrator
        .handle_body(extract_api_key(&headers), body)
        .await
        .into_response()
}

fn body_rejection(rejection: BytesRejection) -> ProxyError {
    debug!(status = rejection.status().as_u16(), reason = %rejection.body_text(), "Request body rejected");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ProxyError::InvalidInput("Request body too large".to_string())
    } else {
        ProxyError::InvalidInput("Failed to read request body".to_string())
    }
}
