//! Integration tests for the chat relay
//!
//! These tests drive the real router through `axum-test` with a wiremock
//! server standing in for the upstream provider.

mod health;
mod preflight;
