//! Login session flow.
//!
//! # Responsibilities
//! - POST credentials through the gateway and store the issued tokens
//! - Report envelope-level login failures as a single warning
//! - Clear the session on logout
//!
//! # Design Decisions
//! - Shares the session with its gateway, so a successful login
//!   authenticates every later call made through it
//! - Login failures carry no field attribution

pub mod envelope;

use std::sync::Arc;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::gateway::{Gateway, GatewayError, RequestOptions};
use crate::notification::{Notification, NotificationSink};
use crate::session::{CredentialStore, SessionContext};

pub use envelope::{ApiEnvelope, LoginCredentials, TokenPair};

/// Shown when a rejected login carries no message of its own.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Login/logout on top of a [`Gateway`].
#[derive(Clone)]
pub struct AuthService {
    gateway: Gateway,
    session: Arc<SessionContext>,
    error_title: String,
}

impl AuthService {
    pub fn new(
        config: &ClientConfig,
        session: Arc<SessionContext>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self, GatewayError> {
        let gateway = Gateway::new(config, session.clone(), sink)?;
        Ok(Self {
            gateway,
            session,
            error_title: config.notifications.error_title.clone(),
        })
    }

    /// Gateway sharing this service's session.
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Returns true when tokens were issued and stored.
    pub async fn login(&self, login_url: &str, credentials: Value) -> bool {
        let result = self
            .gateway
            .request::<ApiEnvelope<TokenPair>>(login_url, RequestOptions::post(credentials))
            .await;

        // Transport and status failures were already reported by the gateway.
        let Some(envelope) = result.into_parts().0 else {
            return false;
        };

        match envelope.data {
            Some(tokens) => {
                self.session
                    .store_tokens(tokens.access.into(), Some(tokens.refresh.into()));
                tracing::info!(url = %login_url, "Login succeeded");
                true
            }
            None => {
                let message = envelope
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
                tracing::warn!(url = %login_url, message = %message, "Login rejected");
                self.gateway
                    .notify(Notification::warning(self.error_title.as_str(), message));
                false
            }
        }
    }

    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("Logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.get().is_some()
    }
}
