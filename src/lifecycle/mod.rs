//! Lifecycle management for the mock backend server.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → every subscribed server stops accepting → drains → exits
//!
//! Signals (signals.rs):
//!     Ctrl+C / SIGTERM → Shutdown::trigger()
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
