//! Upstream wire types
//!
//! The outbound request follows the OpenAI-compatible chat completions schema
//! spoken by OpenRouter. The response envelope is typed with every field
//! optional so that provider format drift becomes a classified error instead
//! of a deserialization fault.

use serde::{Deserialize, Serialize};

use crate::conversation::{Conversation, Message, Role};

/// Deployment-fixed generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Provider model identifier
    pub model: String,
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f64,
    /// System directive prepended to every conversation
    pub system_prompt: String,
}

/// Chat completion request sent to the provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl UpstreamRequest {
    /// Prefix the conversation with the system directive
    pub fn new(params: &GenerationParams, conversation: &Conversation) -> Self {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(Message::new(Role::System, params.system_prompt.clone()));
        messages.extend(conversation.messages().iter().cloned());

        Self {
            model: params.model.clone(),
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }

    /// The caller's portion of the conversation, without the system directive
    pub fn conversation(&self) -> &[Message] {
        self.messages.get(1..).unwrap_or_default()
    }
}

/// Chat completion response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionEnvelope {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<CompletionChoice>>,
    /// OpenRouter reports some failures in-band with a 200 status
    #[serde(default)]
    pub error: Option<EnvelopeError>,
}

/// Candidate completion
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message inside a choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    /// Kept loose: providers occasionally send `null` or structured parts
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

/// In-band provider error
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvelopeError {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}
