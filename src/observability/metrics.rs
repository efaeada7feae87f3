//! Metrics collection and exposition.
//!
//! # Metrics
//! - `canvas_fetch_attempts_total` (counter): attempts by strategy, outcome
//! - `canvas_fetch_cache_total` (counter): cache lookups by result
//! - `canvas_fetch_exhausted_total` (counter): fetches that ran out of passes
//! - `canvas_fetch_branch_failures_total` (counter): aggregation branches dropped

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter with an HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one transport attempt.
pub fn record_attempt(strategy: &str, outcome: &'static str) {
    counter!(
        "canvas_fetch_attempts_total",
        "strategy" => strategy.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("canvas_fetch_cache_total", "result" => result).increment(1);
}

pub fn record_exhausted() {
    counter!("canvas_fetch_exhausted_total").increment(1);
}

pub fn record_branch_failure() {
    counter!("canvas_fetch_branch_failures_total").increment(1);
}
