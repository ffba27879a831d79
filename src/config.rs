//! Client configuration, read from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `POS_API_BASE_URL` | Backend origin | `http://localhost:5000` |
//! | `POS_API_TOKEN` | Bearer token, bypasses the credentials file | unset |
//! | `POS_CREDENTIALS_FILE` | JSON file holding `{"jwt": "..."}` | `<config dir>/pos-actions/auth.json` |

use std::path::PathBuf;

use crate::credentials::default_credentials_path;
use crate::error::SetupError;

pub const BASE_URL_VAR: &str = "POS_API_BASE_URL";
pub const TOKEN_VAR: &str = "POS_API_TOKEN";
pub const CREDENTIALS_FILE_VAR: &str = "POS_CREDENTIALS_FILE";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Where the bearer token comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    /// Read the named environment variable on every request.
    Env(String),
    /// Read the JSON credentials file on every request.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: CredentialSource,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, credentials: CredentialSource) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn from_env() -> Result<Self, SetupError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SetupError> {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;

        let credentials = if lookup(TOKEN_VAR).is_some_and(|v| !v.is_empty()) {
            CredentialSource::Env(TOKEN_VAR.to_string())
        } else if let Some(path) = lookup(CREDENTIALS_FILE_VAR).filter(|v| !v.is_empty()) {
            CredentialSource::File(PathBuf::from(path))
        } else {
            CredentialSource::File(default_credentials_path().ok_or(SetupError::NoConfigDir)?)
        };

        Ok(Self { base_url, credentials })
    }
}

fn validate_base_url(base_url: &str) -> Result<(), SetupError> {
    let url = reqwest::Url::parse(base_url)
        .map_err(|e| SetupError::Config(format!("{BASE_URL_VAR}={base_url}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SetupError::Config(format!(
            "{BASE_URL_VAR} must be http or https, got {other}"
        ))),
    }
}
