//! Failure notification subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway failure
//!     → normalizer (Vec<String> of display messages)
//!     → dispatch() (one Notification per message)
//!     → NotificationSink (toast channel, tracing log, ...)
//! ```
//!
//! # Design Decisions
//! - Sinks are injected; the core never renders anything itself
//! - Dispatch is fire-and-forget: sink errors are logged and dropped
//! - A failing sink never masks the request result, even if it panics

pub mod sink;

use std::panic::{self, AssertUnwindSafe};

use crate::observability::metrics;

pub use sink::{
    ChannelSink, Notification, NotificationSink, NullSink, Severity, SinkError, TracingSink,
};

/// Hand a notification to the sink, swallowing any failure.
///
/// A panicking sink is treated like one that returned an error.
pub fn dispatch(sink: &dyn NotificationSink, notification: Notification, record_metrics: bool) {
    let severity = notification.severity;
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| sink.notify(notification)))
        .unwrap_or_else(|payload| Err(SinkError::Rejected(panic_message(payload.as_ref()))));

    match outcome {
        Ok(()) => {
            if record_metrics {
                metrics::record_notification(severity);
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, severity = severity.as_str(), "Failed to deliver notification");
            if record_metrics {
                metrics::record_notification_failure();
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("sink panicked: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use ::metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };

    /// Remembers the names of counters touched while installed.
    #[derive(Default)]
    struct CounterNames(Mutex<Vec<String>>);

    impl Recorder for CounterNames {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.0.lock().unwrap().push(key.name().to_string());
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn notify(&self, _notification: Notification) -> Result<(), SinkError> {
            Err(SinkError::Rejected("renderer offline".into()))
        }
    }

    struct PanickingSink;

    impl NotificationSink for PanickingSink {
        fn notify(&self, _notification: Notification) -> Result<(), SinkError> {
            panic!("renderer exploded");
        }
    }

    #[test]
    fn test_dispatch_swallows_sink_errors() {
        dispatch(&FailingSink, Notification::error("Error", "boom"), true);
    }

    #[test]
    fn test_dispatch_contains_sink_panic() {
        dispatch(&PanickingSink, Notification::error("Error", "boom"), false);
    }

    #[test]
    fn test_panic_message_extracts_payload() {
        let payload = panic::catch_unwind(|| panic!("renderer exploded")).unwrap_err();
        assert_eq!(
            panic_message(payload.as_ref()),
            "sink panicked: renderer exploded"
        );

        let payload = panic::catch_unwind(|| panic!("code {}", 7)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "sink panicked: code 7");
    }

    #[test]
    fn test_dispatch_delivers() {
        let (sink, mut rx) = ChannelSink::new();
        dispatch(&sink, Notification::error("Error", "boom"), true);
        assert_eq!(rx.try_recv().unwrap().description, "boom");
    }

    #[test]
    fn test_metrics_follow_flag() {
        let recorder = CounterNames::default();
        ::metrics::with_local_recorder(&recorder, || {
            dispatch(&NullSink, Notification::error("Error", "quiet"), false);
            dispatch(&PanickingSink, Notification::error("Error", "quiet"), false);
        });
        assert!(recorder.0.lock().unwrap().is_empty());

        ::metrics::with_local_recorder(&recorder, || {
            dispatch(&NullSink, Notification::error("Error", "counted"), true);
            dispatch(&FailingSink, Notification::error("Error", "counted"), true);
        });
        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![
                "gateway_notifications_total".to_string(),
                "gateway_notification_failures_total".to_string(),
            ]
        );
    }
}
