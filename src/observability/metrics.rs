//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_decisions_total` (counter): decisions by outcome
//! - `router_decision_duration_seconds` (histogram): engine latency, session check included
//! - `router_session_checks_total` (counter): verifier results (valid, absent, error, timeout)
//! - `router_request_duration_seconds` (histogram): end-to-end latency by outcome
//! - `router_upstream_errors_total` (counter): renderer forwarding failures
//!
//! Without an installed recorder every call here is a no-op.

use metrics::{counter, histogram};
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

pub fn record_decision(outcome: &'static str, start: Instant) {
    counter!("router_decisions_total", "outcome" => outcome).increment(1);
    histogram!("router_decision_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_session_check(result: &'static str) {
    counter!("router_session_checks_total", "result" => result).increment(1);
}

pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    histogram!(
        "router_request_duration_seconds",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_error() {
    counter!("router_upstream_errors_total").increment(1);
}
