//! Token persistence for processes that outlive a single session.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::context::{Credential, CredentialStore, SessionContext};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("token file IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTokens {
    access: Credential,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh: Option<Credential>,
}

/// JSON file holding the access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore a session from disk. A missing file yields an empty session.
    pub fn load(&self) -> Result<SessionContext, CredentialError> {
        let session = SessionContext::new();
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(session),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredTokens = serde_json::from_str(&content)?;
        session.store_tokens(stored.access, stored.refresh);
        tracing::debug!(path = %self.path.display(), "Session restored from token file");
        Ok(session)
    }

    /// Write the session's tokens, or remove the file when unauthenticated.
    pub fn save(&self, session: &SessionContext) -> Result<(), CredentialError> {
        let Some(access) = session.get() else {
            return self.remove();
        };
        let stored = StoredTokens {
            access,
            refresh: session.refresh_token(),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(&stored)?;

        let mut file = open_private(&self.path)?;
        file.write_all(&bytes)?;
        Ok(())
    }

    pub fn remove(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Open for writing, readable by the owner only on Unix.
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;
    // `mode` only applies on creation; tighten files that already existed.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}
