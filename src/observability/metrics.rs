//! Metrics collection and exposition.
//!
//! # Metrics
//! - `worker_requests_total` (counter): requests by method, route, status
//! - `worker_request_duration_seconds` (histogram): dispatch latency by
//!   method and route
//!
//! Route labels are handler names (`stats`, `auth_login`, ...) plus
//! `preflight` and `none`, so label cardinality stays bounded.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "worker_requests_total";
pub const REQUEST_DURATION: &str = "worker_request_duration_seconds";

/// Install the Prometheus exporter listening on `addr`.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!(REQUESTS_TOTAL, &labels).increment(1);

    let timing = [("method", method.to_string()), ("route", route.to_string())];
    metrics::histogram!(REQUEST_DURATION, &timing).record(start.elapsed().as_secs_f64());
}
