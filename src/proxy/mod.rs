//! Proxy module
//!
//! Builds upstream requests, talks to the LLM provider and normalizes
//! whatever comes back into an [`UpstreamResult`].

pub mod headers;
pub mod mock;
pub mod normalize;
pub mod openrouter;
pub mod provider;
pub mod types;

pub use mock::MockProvider;
pub use normalize::{normalize, UpstreamResult};
pub use openrouter::OpenRouterProvider;
pub use provider::{ChatProvider, UpstreamFailure};
pub use types::{GenerationParams, UpstreamRequest};
