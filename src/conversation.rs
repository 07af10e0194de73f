//! Conversation types
//!
//! A [`Conversation`] is the validated, ordered list of turns forwarded to the
//! provider. It can only be built through [`Conversation::new`] or
//! [`Conversation::from_prompt`], both of which enforce the non-empty invariant.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ProxyError, ProxyResult};

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(ProxyError::InvalidInput(format!(
                "Unsupported message role: {}",
                other
            ))),
        }
    }
}

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Validated conversation, in chronological order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Build a conversation, requiring at least one message with non-blank content
    pub fn new(messages: Vec<Message>) -> ProxyResult<Self> {
        if messages.is_empty() {
            return Err(ProxyError::InvalidInput(
                "messages must not be empty".to_string(),
            ));
        }
        if messages.iter().all(|m| m.content.trim().is_empty()) {
            return Err(ProxyError::InvalidInput(
                "messages must contain non-empty content".to_string(),
            ));
        }
        Ok(Self { messages })
    }

    /// Wrap a single prompt as a one-turn user conversation
    pub fn from_prompt(prompt: impl Into<String>) -> ProxyResult<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(ProxyError::InvalidInput("No prompt provided".to_string()));
        }
        Ok(Self {
            messages: vec![Message::new(Role::User, prompt)],
        })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Content of the most recent user turn, if any
    pub fn last_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}
