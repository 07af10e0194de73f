//! HTTP routes for the chat relay
//!
//! This module defines all HTTP endpoints exposed by the proxy.

pub mod chat;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{auth::API_KEY_HEADER, AppState};

/// Methods advertised on the chat endpoint
pub const ALLOWED_METHODS: [Method; 2] = [Method::POST, Method::OPTIONS];

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Answers every OPTIONS request, with or without Origin, before it
    // reaches the router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(AllowMethods::list(ALLOWED_METHODS))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            HeaderName::from_static(API_KEY_HEADER),
        ]));

    let api_routes = Router::new().route("/api/chat", post(chat::chat));

    // Public routes (health checks, metrics)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (applied to all routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
