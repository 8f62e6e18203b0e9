//! Request metrics.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, status
//! - `api_request_duration_seconds` (histogram): request latency
//!
//! # Design Decisions
//! - Records through the `metrics` facade; the embedding application
//!   installs the exporter (recording without one is a no-op)

use std::time::Instant;

/// Record one finished request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    metrics::histogram!("api_request_duration_seconds").record(elapsed);
}
