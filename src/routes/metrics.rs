//! Prometheus metrics endpoint

use axum::response::IntoResponse;

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    crate::metrics::render()
}
