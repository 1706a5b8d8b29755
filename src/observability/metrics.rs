//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lab_requests_total` (counter): requests by method, route, status
//! - `lab_request_duration_seconds` (histogram): latency by route
//! - `lab_ws_connections` (gauge): live simulator sockets
//!
//! # Design Decisions
//! - Prometheus scrape endpoint on its own listener, off by default
//! - Route label is the table entry name, not the raw path, to bound
//!   cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics endpoint listening");
        }
        Err(error) => {
            tracing::error!(%error, "Failed to install metrics exporter");
        }
    }
}

/// Record one finished request.
pub fn record_request(method: &str, route: &'static str, status: u16, started: Instant) {
    metrics::counter!(
        "lab_requests_total",
        "method" => method.to_string(),
        "route" => route,
        "status" => status.to_string(),
    )
    .increment(1);

    metrics::histogram!("lab_request_duration_seconds", "route" => route)
        .record(started.elapsed().as_secs_f64());
}

/// Track the live simulator socket count.
pub fn record_ws_connections(count: usize) {
    metrics::gauge!("lab_ws_connections").set(count as f64);
}
