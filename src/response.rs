//! Caller-facing response
//!
//! Success bodies are `{"answer": "..."}`, failures are `{"error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::ProxyError;

/// Final result of one chat call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyResponse {
    Answer { text: String },
    Error { status: StatusCode, message: String },
}

#[derive(Debug, Serialize)]
struct AnswerBody<'a> {
    answer: &'a str,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ProxyResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyResponse::Answer { .. } => StatusCode::OK,
            ProxyResponse::Error { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProxyResponse::Answer { .. })
    }
}

impl From<ProxyError> for ProxyResponse {
    fn from(err: ProxyError) -> Self {
        ProxyResponse::Error {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        match &self {
            ProxyResponse::Answer { text } => {
                (StatusCode::OK, Json(AnswerBody { answer: text })).into_response()
            }
            ProxyResponse::Error { status, message } => {
                (*status, Json(ErrorBody { error: message })).into_response()
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        ProxyResponse::from(self).into_response()
    }
}
