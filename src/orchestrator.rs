//! Request orchestration
//!
//! Runs one inbound chat call through its stages:
//!
//! ```text
//! Received -> Authenticating -> Decoding -> Calling -> Normalizing -> Responded
//! ```
//!
//! Any stage may short-circuit to `Responded` with an error; later stages do
//! not run. Panics anywhere in the pipeline are caught here and reported as
//! `InternalFault`.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::auth::{AuthDecision, CredentialVerifier};
use crate::error::{ProxyError, ProxyResult};
use crate::metrics::record_request;
use crate::proxy::{normalize, ChatProvider, GenerationParams, UpstreamFailure, UpstreamRequest};
use crate::request::decode_request;
use crate::response::ProxyResponse;

/// Lifecycle stage of a chat call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Authenticating,
    Decoding,
    Calling,
    Normalizing,
    Responded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Authenticating => "authenticating",
            Stage::Decoding => "decoding",
            Stage::Calling => "calling",
            Stage::Normalizing => "normalizing",
            Stage::Responded => "responded",
        };
        f.write_str(name)
    }
}

/// Composes verifier, decoder, provider and normalizer for each call
///
/// Holds only immutable configuration; a single instance serves all
/// concurrent requests.
pub struct Orchestrator {
    verifier: CredentialVerifier,
    provider: Arc<dyn ChatProvider>,
    generation: GenerationParams,
    upstream_timeout: Duration,
}

impl Orchestrator {
    pub fn new(
        verifier: CredentialVerifier,
        provider: Arc<dyn ChatProvider>,
        generation: GenerationParams,
        upstream_timeout: Duration,
    ) -> Self {
        Self {
            verifier,
            provider,
            generation,
            upstream_timeout,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn auth_enabled(&self) -> bool {
        self.verifier.is_enabled()
    }

    /// Handle one inbound chat call
    pub async fn handle(&self, credential: Option<&str>, body: &[u8]) -> ProxyResponse {
        self.handle_body(credential, Ok(body)).await
    }

    /// Handle a call whose body may have failed to buffer
    ///
    /// A read failure is reported only after the credential check passes.
    pub async fn handle_body(
        &self,
        credential: Option<&str>,
        body: ProxyResult<&[u8]>,
    ) -> ProxyResponse {
        let request_id = Uuid::new_v4().to_string()[..8].to_string();
        let span = info_span!("chat", request_id = %request_id);
        let start = Instant::now();

        let mut stage = Stage::Received;
        let outcome = AssertUnwindSafe(self.run(credential, body, &mut stage))
            .catch_unwind()
            .instrument(span.clone())
            .await
            .unwrap_or_else(|panic| {
                let detail = panic_message(&*panic);
                Err(ProxyError::InternalFault(detail))
            });

        let duration = start.elapsed();
        let response = span.in_scope(|| match outcome {
            Ok(answer) => {
                record_request("success", duration.as_secs_f64());
                info!(
                    duration_ms = duration.as_millis() as u64,
                    answer_chars = answer.chars().count(),
                    "Chat request completed"
                );
                ProxyResponse::Answer { text: answer }
            }
            Err(err) => {
                record_request(err.kind(), duration.as_secs_f64());
                match &err {
                    ProxyError::InternalFault(detail) => error!(
                        failed_stage = %stage,
                        detail = %detail,
                        "Chat request hit an internal fault"
                    ),
                    _ => warn!(
                        failed_stage = %stage,
                        kind = err.kind(),
                        detail = ?err.detail(),
                        duration_ms = duration.as_millis() as u64,
                        "Chat request failed"
                    ),
                }
                ProxyResponse::from(err)
            }
        });
        span.in_scope(|| {
            debug!(stage = %Stage::Responded, status = response.status().as_u16(), "Stage transition");
        });
        response
    }

    async fn run(
        &self,
        credential: Option<&str>,
        body: ProxyResult<&[u8]>,
        stage: &mut Stage,
    ) -> ProxyResult<String> {
        advance(stage, Stage::Authenticating);
        if self.verifier.verify(credential) == AuthDecision::Denied {
            return Err(ProxyError::Unauthorized);
        }

        advance(stage, Stage::Decoding);
        let conversation = decode_request(body?)?;
        debug!(messages = conversation.len(), "Conversation decoded");

        advance(stage, Stage::Calling);
        let request = UpstreamRequest::new(&self.generation, &conversation);
        let outcome = tokio::time::timeout(
            self.upstream_timeout,
            self.provider.chat_completion(&request),
        )
        .await
        .unwrap_or(Err(UpstreamFailure::Timeout));

        advance(stage, Stage::Normalizing);
        normalize(outcome).into_result()
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "Stage transition");
    *stage = next;
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
