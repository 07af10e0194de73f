//! Local mock provider
//!
//! Answers with canned brainstorming replies so the front end can be developed
//! without provider credentials. It produces the same envelope shape as a real
//! provider, so responses still pass through the normalizer.

use async_trait::async_trait;
use bytes::Bytes;
use rand::seq::IndexedRandom;
use serde_json::json;
use tracing::debug;

use super::provider::{ChatProvider, UpstreamFailure};
use super::types::UpstreamRequest;
use crate::conversation::Role;

const REPLIES: &[&str] = &[
    "That's interesting! You mentioned \"{}\". I'm here to help with your brainstorming and creative process.",
    "Great point about \"{}\"! What other ideas are you exploring on your canvas?",
    "I see you're thinking about \"{}\". How does this connect to your other ideas?",
    "\"{}\" - that's a fascinating concept! Would you like to explore this further?",
    "Thanks for sharing \"{}\". I'm here to help you organize and expand your thoughts!",
    "Interesting perspective on \"{}\". How can we build on this idea?",
    "\"{}\" sounds like a great starting point. What's the next step you're considering?",
    "I love the creativity behind \"{}\". What inspired this thought?",
];

/// Provider that never leaves the process
#[derive(Debug, Default, Clone)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    /// Render a reply quoting the latest user turn
    pub fn reply_for(request: &UpstreamRequest) -> String {
        let topic = request
            .conversation()
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.trim())
            .unwrap_or("your idea");

        let template = REPLIES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(REPLIES[0]);
        template.replace("{}", topic)
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn chat_completion(&self, request: &UpstreamRequest) -> Result<Bytes, UpstreamFailure> {
        let reply = Self::reply_for(request);
        debug!(chars = reply.len(), "Serving mock reply");

        let envelope = json!({
            "id": "mock-completion",
            "model": request.model,
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": reply },
                "finish_reason": "stop"
            }]
        });
        Ok(Bytes::from(envelope.to_string()))
    }
}
