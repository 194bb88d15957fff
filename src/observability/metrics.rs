//! Gateway metrics.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): outbound calls by method, outcome
//! - `gateway_request_duration_seconds` (histogram): latency by method
//! - `gateway_notifications_total` (counter): delivered notifications by severity
//! - `gateway_notification_failures_total` (counter): sink failures
//!
//! # Design Decisions
//! - Recorder is installed by the embedding application, if at all
//! - Without a recorder every call is a no-op

use std::time::Instant;

use crate::notification::Severity;

/// Record the outcome of one gateway call.
pub fn record_request(method: &str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("gateway_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_notification(severity: Severity) {
    metrics::counter!("gateway_notifications_total", "severity" => severity.as_str()).increment(1);
}

pub fn record_notification_failure() {
    metrics::counter!("gateway_notification_failures_total").increment(1);
}
