//! Error normalization subsystem.
//!
//! # Data Flow
//! ```text
//! RawError (from gateway)
//!     → classify.rs (detail key present? Structured : Unstructured)
//!     → Structured: node.rs (JSON → ErrorNode) → flatten.rs (ordered strings)
//!     → Unstructured: display_message (raw message or generic text)
//!     → Vec<String> handed to the notification sink
//! ```
//!
//! # Design Decisions
//! - Classification looks only at the body shape, never the status code
//! - Leaves of unknown type are skipped silently
//! - Output is never empty; the generic message is the floor

pub mod classify;
pub mod flatten;
pub mod node;

pub use classify::{classify, display_message, is_backend_error, ErrorInfo, DETAIL_KEY};
pub use flatten::{flatten, format_error, GENERIC_ERROR_MESSAGE};
pub use node::{ErrorNode, NON_FIELD_ERRORS};
