//! Bearer token lookup.
//!
//! Tokens are written by the login flow, which lives outside this crate.
//! Everything here is read-only and re-reads its source on every call, so a
//! token written or cleared after startup is picked up by the next request.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SetupError;

/// Source of the bearer token attached to every request.
pub trait CredentialProvider: Send + Sync {
    /// Returns the current token, or `None` when the caller is not logged in.
    fn bearer_token(&self) -> Option<String>;
}

/// Token held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone().filter(|token| !token.is_empty())
    }
}

/// Token read from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredentials {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct StoredCredentials {
    #[serde(rename = "jwt", default)]
    token: Option<String>,
}

/// Token persisted as `{"jwt": "<token>"}` in a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the user's config directory.
    pub fn at_default_location() -> Result<Self, SetupError> {
        default_credentials_path()
            .map(Self::new)
            .ok_or(SetupError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialProvider for FileCredentialStore {
    fn bearer_token(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let stored: StoredCredentials = match serde_json::from_str(&contents) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable credentials file");
                return None;
            }
        };
        stored.token.filter(|token| !token.is_empty())
    }
}

/// `<config dir>/pos-actions/auth.json`
pub fn default_credentials_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("pos-actions/auth.json"))
}
