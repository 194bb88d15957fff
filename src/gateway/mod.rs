//! Request gateway subsystem.
//!
//! # Data Flow
//! ```text
//! caller: request(path, options)
//!     → request.rs (resolve URL, merge caller headers + bearer token + request ID)
//!     → client.rs (send via reqwest, decode 2xx JSON)
//!     → on failure: normalizer (classify, flatten) → notification sink
//!     → result.rs (RequestResult { data, error })
//!
//! caller: watch(path, options)
//!     → reactive.rs (background task, watch channel, manual refresh)
//! ```
//!
//! # Design Decisions
//! - Failures are values, never `Err` or panics
//! - Notifications are a side channel and never touch the returned result
//! - No retries, queueing or cancellation tracking at this layer

pub mod client;
pub mod error;
pub mod reactive;
pub mod request;
pub mod result;

pub use client::Gateway;
pub use error::{GatewayError, RawError, RawErrorKind};
pub use reactive::{FetchHandle, FetchState};
pub use request::{RequestOptions, X_REQUEST_ID};
pub use result::RequestResult;
