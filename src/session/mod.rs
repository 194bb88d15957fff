//! Session credential subsystem.
//!
//! # Responsibilities
//! - Hold the bearer token for the current session (get/set/clear)
//! - Keep the refresh token issued at login alongside it
//! - Persist tokens to a JSON file for the CLI
//!
//! # Design Decisions
//! - The session is injected into the gateway, never a process global
//! - Tokens are never refreshed or logged

pub mod context;
pub mod file;

pub use context::{Credential, CredentialStore, SessionContext};
pub use file::{CredentialError, TokenFile};
