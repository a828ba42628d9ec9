use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::DriveError;

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// Serialized OAuth credential, as provisioned by the external consent tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredCredentials {
    /// True when the access token is expired or within 60 seconds of it.
    /// A credential without an expiry is taken at face value.
    pub fn needs_refresh(&self) -> bool {
        match self.expiry {
            Some(expiry) => expiry - Duration::seconds(60) <= Utc::now(),
            None => false,
        }
    }
}

/// On-disk credential cache. Read at the start of each upload flow and
/// rewritten after a successful refresh.
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<StoredCredentials, DriveError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| DriveError::Credentials(format!("cannot read {:?}: {e}", self.path)))?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, creds: &StoredCredentials) -> Result<(), DriveError> {
        fs::write(&self.path, serde_json::to_string_pretty(creds)?)?;
        Ok(())
    }
}
