//! In-memory session credential slot.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};

/// Opaque bearer token. Debug output is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Source of the bearer token attached to outbound requests.
///
/// Implementations are read once per request; the value returned is treated
/// as an immutable snapshot for that call.
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<Credential>;
    fn set(&self, credential: Credential);
    fn clear(&self);
}

/// Session-scoped credential slot shared by a gateway and its callers.
///
/// Reads are lock-free snapshots, so any number of in-flight requests can
/// read concurrently with a login or logout.
#[derive(Default)]
pub struct SessionContext {
    access: ArcSwapOption<Credential>,
    refresh: ArcSwapOption<Credential>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that starts out authenticated.
    pub fn with_token(token: impl Into<Credential>) -> Self {
        let session = Self::new();
        session.set(token.into());
        session
    }

    /// Store both tokens issued by a login.
    pub fn store_tokens(&self, access: Credential, refresh: Option<Credential>) {
        self.access.store(Some(Arc::new(access)));
        self.refresh.store(refresh.map(Arc::new));
    }

    pub fn refresh_token(&self) -> Option<Credential> {
        self.refresh.load_full().map(|c| (*c).clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access.load().is_some()
    }
}

impl CredentialStore for SessionContext {
    fn get(&self) -> Option<Credential> {
        self.access.load_full().map(|c| (*c).clone())
    }

    fn set(&self, credential: Credential) {
        self.access.store(Some(Arc::new(credential)));
    }

    fn clear(&self) {
        self.access.store(None);
        self.refresh.store(None);
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
