//! Caller authentication
//!
//! Compares the caller-supplied `api-key` header against the configured key.
//! Both values are hashed with SHA-256 first and the fixed-length digests are
//! compared with `subtle`, so neither the position of the first mismatching
//! byte nor the length of the guess influences timing.

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Header carrying the caller credential
pub const API_KEY_HEADER: &str = "api-key";

/// Outcome of a credential check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Authorized,
    Denied,
}

/// Verifies caller credentials against the configured key
#[derive(Clone)]
pub struct CredentialVerifier {
    expected: Option<[u8; 32]>,
}

impl CredentialVerifier {
    /// Create a verifier; `None` disables authentication
    pub fn new(api_key: Option<&str>) -> Self {
        if api_key.is_none() {
            warn!("Caller authentication is DISABLED: every request will be accepted");
        }
        Self {
            expected: api_key.map(digest),
        }
    }

    /// Whether a credential is required
    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    /// Check a caller-supplied credential
    pub fn verify(&self, supplied: Option<&str>) -> AuthDecision {
        let Some(expected) = &self.expected else {
            return AuthDecision::Authorized;
        };

        // Hash even when the header is absent so both paths do the same work
        let candidate = digest(supplied.unwrap_or_default());
        let matches: bool = candidate[..].ct_eq(&expected[..]).into();

        if matches && supplied.is_some() {
            AuthDecision::Authorized
        } else {
            AuthDecision::Denied
        }
    }
}

/// Extract the caller credential from request headers
pub fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok())
}

fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}
