//! Session token storage and expiry monitoring settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const TOKEN_KEY: &str = "adminToken";

const fn default_poll_interval_secs() -> u64 {
    30
}

const fn default_warning_threshold_secs() -> u64 {
    5 * 60
}

/// Where the admin bearer token is persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorageKind {
    /// OS keychain, falling back to the credentials file.
    Keyring,
    /// Credentials file (`session.token_path`).
    #[default]
    File,
    /// Process memory only; nothing survives exit.
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Remaining lifetime at or below which the expiry notice is shown.
    #[serde(default = "default_warning_threshold_secs")]
    pub warning_threshold_secs: u64,

    #[serde(default)]
    pub storage: TokenStorageKind,

    /// Credentials file path. Defaults to `~/.folio/adminToken`.
    #[serde(default)]
    pub token_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            warning_threshold_secs: default_warning_threshold_secs(),
            storage: TokenStorageKind::default(),
            token_path: None,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub const fn warning_threshold(&self) -> Duration {
        Duration::from_secs(self.warning_threshold_secs)
    }

    /// Resolved credentials file path, if one can be determined.
    #[must_use]
    pub fn resolved_token_path(&self) -> Option<PathBuf> {
        match &self.token_path {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => dirs::home_dir().map(|home| home.join(".folio").join(TOKEN_KEY)),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.poll_interval_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.warning_threshold_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.warning_threshold_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
