//! Metrics collection and exposition.
//!
//! # Metrics
//! - `studio_requests_total` (counter): requests by route, status
//! - `studio_request_duration_seconds` (histogram): latency distribution
//! - `studio_titles_truncated_total` (counter): titles shortened by the API
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op
//! - Labels for route name and status code only

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let status = status.to_string();
    metrics::counter!(
        "studio_requests_total",
        "method" => method.to_string(),
        "status" => status.clone(),
        "route" => route.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "studio_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status,
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record how many titles a truncation request shortened.
pub fn record_truncated(count: usize) {
    if count > 0 {
        metrics::counter!("studio_titles_truncated_total").increment(count as u64);
    }
}
