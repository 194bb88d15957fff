//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! gateway, notification, mock backend:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_tracing;
