//! Metrics recorder
//!
//! Installs the Prometheus recorder and records relay counters. The
//! `/metrics` route renders [`render`].

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "chat_relay_requests_total",
        "Chat requests answered, by outcome"
    );
    metrics::describe_histogram!(
        "chat_relay_request_duration_seconds",
        "Chat request duration in seconds, by outcome"
    );
    metrics::describe_counter!(
        "chat_relay_upstream_status_total",
        "HTTP statuses returned by the upstream provider"
    );
}

/// Prometheus text exposition of everything recorded so far
pub fn render() -> String {
    PROMETHEUS_HANDLE.render()
}

/// Record a finished chat request
pub fn record_request(outcome: &str, duration_secs: f64) {
    metrics::counter!("chat_relay_requests_total", "outcome" => outcome.to_string()).increment(1);
    metrics::histogram!("chat_relay_request_duration_seconds", "outcome" => outcome.to_string())
        .record(duration_secs);
}

/// Record a status code returned by the provider
pub fn record_upstream_status(status: u16) {
    metrics::counter!("chat_relay_upstream_status_total", "status" => status.to_string())
        .increment(1);
}
