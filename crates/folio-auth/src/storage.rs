//! Persistence backends for the admin session token.
//!
//! The token is a single string under the `adminToken` key, absent when
//! logged out. Backends only load, save and remove it; change notification
//! and logout semantics live in [`crate::session::SessionStore`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use folio_config::{SessionConfig, TOKEN_KEY, TokenStorageKind};

use crate::error::AuthError;

const KEYRING_SERVICE: &str = "folio-admin";

pub trait TokenStorage: Send + Sync {
    /// Load the stored token. `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError` if the backend cannot be written.
    fn save(&self, token: &str) -> Result<(), AuthError>;

    /// Remove the stored token. Removing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the backend cannot be modified.
    fn remove(&self) -> Result<(), AuthError>;

    /// Short backend name for status output.
    fn describe(&self) -> &'static str;
}

/// Build the backend selected by `session.storage`.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if a file-backed store is requested
/// but no credentials path can be resolved.
pub fn from_config(config: &SessionConfig) -> Result<Box<dyn TokenStorage>, AuthError> {
    match config.storage {
        TokenStorageKind::Memory => Ok(Box::new(MemoryStorage::default())),
        TokenStorageKind::File => Ok(Box::new(FileStorage::new(token_path(config)?))),
        TokenStorageKind::Keyring => Ok(Box::new(KeyringStorage::new(
            KEYRING_SERVICE,
            FileStorage::new(token_path(config)?),
        ))),
    }
}

fn token_path(config: &SessionConfig) -> Result<PathBuf, AuthError> {
    config.resolved_token_path().ok_or_else(|| {
        AuthError::TokenStoreError("home directory not found; cannot store credentials".into())
    })
}

// --- Memory ---

#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, AuthError> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), AuthError> {
        *self.slot() = None;
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "memory"
    }
}

// --- File ---

/// Credentials file with owner-only permissions on Unix.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::TokenStoreError(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(&self.path, token).map_err(|e| {
            AuthError::TokenStoreError(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }

    fn remove(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::TokenStoreError(format!(
                "failed to delete {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn describe(&self) -> &'static str {
        "file"
    }
}

// --- Keyring ---

/// OS keychain entry, falling back to a credentials file when the keychain
/// is unavailable (headless sessions, CI).
pub struct KeyringStorage {
    service: String,
    fallback: FileStorage,
}

impl KeyringStorage {
    #[must_use]
    pub fn new(service: &str, fallback: FileStorage) -> Self {
        Self {
            service: service.to_string(),
            fallback,
        }
    }

    fn entry(&self) -> Result<keyring::Entry, AuthError> {
        keyring::Entry::new(&self.service, TOKEN_KEY).map_err(|e| AuthError::KeyringError(e.to_string()))
    }
}

impl TokenStorage for KeyringStorage {
    fn load(&self) -> Result<Option<String>, AuthError> {
        if let Ok(entry) = self.entry()
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Ok(Some(token));
        }
        self.fallback.load()
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        match self.entry().and_then(|entry| {
            entry
                .set_password(token)
                .map_err(|e| AuthError::KeyringError(e.to_string()))
        }) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                self.fallback.save(token)
            }
        }
    }

    fn remove(&self) -> Result<(), AuthError> {
        // The fallback file is removed even when the keychain delete fails.
        let keychain = match self.entry() {
            Ok(entry) => match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                // Headless hosts fail every keychain call; only report the
                // failure when a credential is still readable.
                Err(e) if entry.get_password().is_ok() => Err(AuthError::KeyringError(e.to_string())),
                Err(e) => {
                    tracing::debug!(error = %e, "keychain delete failed; no credential present");
                    Ok(())
                }
            },
            // No usable keychain means nothing was ever stored there.
            Err(_) => Ok(()),
        };
        self.fallback.remove()?;
        keychain
    }

    fn describe(&self) -> &'static str {
        "keyring"
    }
}
