//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bff_requests_total` (counter): requests by method and status
//! - `bff_request_duration_seconds` (histogram): end-to-end latency by method
//!
//! Without an installed recorder these calls are no-ops.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    counter!(
        "bff_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!("bff_request_duration_seconds", "method" => method.to_string())
        .record(start_time.elapsed().as_secs_f64());
}
