//! Durable session storage.
//!
//! The session survives client restarts as a two-key TOML file (`token`,
//! `role`) under the user's config directory. The pair is always written or
//! removed together; only [`super::SessionStore`] touches this file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Exactly one of the two session keys was present on disk. The pair is
    /// always written together, so this is a defect to surface, not a state
    /// to repair.
    #[error("inconsistent persisted session: `{present}` present without `{missing}`")]
    Inconsistent {
        present: &'static str,
        missing: &'static str,
    },

    #[error("accessing session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing session file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serializing session: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Raw persisted form of the session, before the role string is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// File-backed storage for the session pair.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted pair. A missing file is an empty session; a file
    /// holding exactly one key is rejected as [`SessionError::Inconsistent`].
    pub fn load(&self) -> Result<PersistedSession, SessionError> {
        if !self.path.exists() {
            return Ok(PersistedSession::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        let persisted: PersistedSession = toml::from_str(&contents)?;
        match (&persisted.token, &persisted.role) {
            (Some(_), None) => Err(SessionError::Inconsistent {
                present: "token",
                missing: "role",
            }),
            (None, Some(_)) => Err(SessionError::Inconsistent {
                present: "role",
                missing: "token",
            }),
            _ => Ok(persisted),
        }
    }

    /// Write both keys together, or remove the file entirely when clearing.
    pub fn store(&self, persisted: &PersistedSession) -> Result<(), SessionError> {
        if persisted.token.is_none() && persisted.role.is_none() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = toml::to_string_pretty(persisted)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}
