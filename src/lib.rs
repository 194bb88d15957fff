//! Authenticated API gateway client with backend error normalization.
//!
//! ```text
//!   caller ──request(path, options)──▶ gateway ──reqwest──▶ backend
//!                                        │
//!                      failure ◀─────────┤
//!                         │              └──▶ RequestResult { data, error }
//!                         ▼
//!                    normalizer (classify, flatten)
//!                         │
//!                         ▼
//!                  notification sink (toast / log)
//! ```

pub mod auth;
pub mod config;
pub mod gateway;
pub mod lifecycle;
pub mod mock;
pub mod normalizer;
pub mod notification;
pub mod observability;
pub mod session;

pub use auth::AuthService;
pub use config::ClientConfig;
pub use gateway::{Gateway, RequestOptions, RequestResult};
pub use lifecycle::Shutdown;
pub use session::SessionContext;
