//! Response normalization
//!
//! Turns the outcome of the single upstream attempt into an answer or a
//! classified [`ProxyError`]. Malformed envelopes never panic; they degrade to
//! `UpstreamFormatError`.

use bytes::Bytes;
use tracing::warn;

use super::provider::UpstreamFailure;
use super::types::{ChoiceMessage, CompletionEnvelope, EnvelopeError};
use crate::error::{excerpt, ProxyError};

/// Normalized upstream result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamResult {
    Success { answer: String },
    Failure(ProxyError),
}

impl UpstreamResult {
    pub fn into_result(self) -> Result<String, ProxyError> {
        match self {
            UpstreamResult::Success { answer } => Ok(answer),
            UpstreamResult::Failure(err) => Err(err),
        }
    }
}

/// Classify the raw upstream outcome
pub fn normalize(outcome: Result<Bytes, UpstreamFailure>) -> UpstreamResult {
    match outcome {
        Ok(body) => extract_answer(&body),
        Err(UpstreamFailure::Timeout) => UpstreamResult::Failure(ProxyError::UpstreamTimeout),
        Err(UpstreamFailure::Network(detail)) => {
            UpstreamResult::Failure(ProxyError::UpstreamNetworkFailure(detail))
        }
        Err(UpstreamFailure::NonSuccessStatus { status, body }) => {
            let err = ProxyError::upstream(status, &body);
            if let ProxyError::UpstreamError { excerpt, .. } = &err {
                warn!(status, body = %excerpt, "Provider returned non-success status");
            }
            UpstreamResult::Failure(err)
        }
    }
}

fn extract_answer(body: &[u8]) -> UpstreamResult {
    let envelope: CompletionEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            let preview = excerpt(&String::from_utf8_lossy(body));
            warn!(error = %e, body = %preview, "Provider envelope is not valid JSON");
            return format_error(format!("envelope did not parse: {}", e));
        }
    };

    let answer = envelope
        .choices
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find_map(|choice| choice.message.as_ref().and_then(text_content));

    match (answer, envelope.error) {
        (Some(answer), _) => UpstreamResult::Success { answer },
        (None, Some(error)) => UpstreamResult::Failure(in_band_error(&error)),
        (None, None) => {
            let choices = envelope.choices.as_deref().unwrap_or_default();
            let finish_reasons: Vec<&str> = choices
                .iter()
                .filter_map(|choice| choice.finish_reason.as_deref())
                .collect();
            warn!(
                choices = choices.len(),
                id = ?envelope.id,
                model = ?envelope.model,
                finish_reasons = ?finish_reasons,
                "Provider envelope has no textual choice"
            );
            format_error(format!("no textual content among {} choices", choices.len()))
        }
    }
}

/// Text of a choice message; string content or a list of text parts
fn text_content(message: &ChoiceMessage) -> Option<String> {
    let text = match message.content.as_ref()? {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect::<String>(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn in_band_error(error: &EnvelopeError) -> ProxyError {
    let status = error
        .code
        .as_ref()
        .and_then(|code| code.as_u64())
        .and_then(|code| u16::try_from(code).ok())
        .filter(|code| (400..=599).contains(code))
        .unwrap_or(500);
    let message = error.message.as_deref().unwrap_or("unknown provider error");
    warn!(status, message = %excerpt(message), "Provider reported an in-band error");
    ProxyError::upstream(status, message)
}

fn format_error(detail: String) -> UpstreamResult {
    UpstreamResult::Failure(ProxyError::UpstreamFormatError(detail))
}
