//! Inbound request decoding
//!
//! Accepts either `{"prompt": "..."}` or `{"messages": [{"role", "content"}]}`.
//! Unknown fields are ignored so older and newer clients can share the endpoint.

use serde::Deserialize;

use crate::conversation::{Conversation, Message, Role};
use crate::error::{ProxyError, ProxyResult};

/// Raw chat request as sent by clients
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Single prompt (legacy form)
    #[serde(default)]
    pub prompt: Option<String>,
    /// Explicit conversation; takes precedence over `prompt`
    #[serde(default)]
    pub messages: Option<Vec<IncomingMessage>>,
}

/// Raw message entry
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatRequest {
    /// Validate into a [`Conversation`]
    pub fn into_conversation(self) -> ProxyResult<Conversation> {
        match (self.messages, self.prompt) {
            (Some(messages), _) => {
                let messages = messages
                    .into_iter()
                    .enumerate()
                    .map(|(index, entry)| entry.into_message(index))
                    .collect::<ProxyResult<Vec<_>>>()?;
                Conversation::new(messages)
            }
            (None, Some(prompt)) => Conversation::from_prompt(prompt),
            (None, None) => Err(ProxyError::InvalidInput(
                "No prompt provided".to_string(),
            )),
        }
    }
}

impl IncomingMessage {
    fn into_message(self, index: usize) -> ProxyResult<Message> {
        match (self.role, self.content) {
            (None, None) => Err(ProxyError::InvalidInput(format!(
                "messages[{}] must have a role or content",
                index
            ))),
            (role, content) => {
                let role = match role {
                    Some(role) => role.parse()?,
                    None => Role::User,
                };
                Ok(Message::new(role, content.unwrap_or_default()))
            }
        }
    }
}

/// Decode a raw request body into a validated conversation
pub fn decode_request(body: &[u8]) -> ProxyResult<Conversation> {
    let request: ChatRequest = serde_json::from_slice(body)
        .map_err(|_| ProxyError::InvalidInput("Invalid JSON in request body".to_string()))?;
    request.into_conversation()
}
