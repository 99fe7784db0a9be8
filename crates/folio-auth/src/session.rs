//! The shared session token and its change notifications.
//!
//! Both the HTTP layer and the session monitor read the token from here and
//! may end the session. Ending is compare-and-clear: only the caller that
//! still sees the token it acted on clears it, so a burst of 401 responses
//! plus a concurrent expiry check produce a single
//! [`AuthEvent::LoginRequired`].

use std::fmt;
use std::sync::{Mutex, PoisonError};

use tokio::sync::{broadcast, watch};

use crate::claims::SessionClaims;
use crate::error::AuthError;
use crate::storage::{MemoryStorage, TokenStorage};

const EVENT_CAPACITY: usize = 16;

/// Why a session ended without the user asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The server answered 401 to a request carrying the token.
    Unauthorized,
    /// The token's `exp` claim has passed.
    Expired,
    /// The token could not be decoded.
    Malformed,
    /// The mount-time guard's verify call was rejected.
    Rejected,
    /// An admin view was opened with no stored token.
    NoSession,
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unauthorized => "unauthorized",
            Self::Expired => "expired",
            Self::Malformed => "malformed",
            Self::Rejected => "rejected",
            Self::NoSession => "no_session",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn { subject: Option<String> },
    LoggedOut,
    LoginRequired { reason: LogoutReason },
}

pub struct SessionStore {
    storage: Box<dyn TokenStorage>,
    // Serializes read-then-clear so concurrent enders cannot both win.
    // Holds a token that was ended but could not be removed from storage.
    ended: Mutex<Option<String>>,
    present: watch::Sender<bool>,
    events: broadcast::Sender<AuthEvent>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        let initial = storage.load().ok().flatten().is_some();
        let (present, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            ended: Mutex::new(None),
            present,
            events,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::default()))
    }

    /// The current token, if any. Storage read failures are logged and
    /// treated as "no session", as is a token this store already ended.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        let ended = self.lock();
        self.current(ended.as_deref())
    }

    fn current(&self, ended: Option<&str>) -> Option<String> {
        match self.storage.load() {
            Ok(token) => token.filter(|t| Some(t.as_str()) != ended),
            Err(error) => {
                tracing::warn!(%error, "failed to read session token");
                None
            }
        }
    }

    /// Store a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the backend cannot persist the token.
    pub fn set(&self, token: &str) -> Result<(), AuthError> {
        let mut ended = self.lock();
        self.storage.save(token)?;
        *ended = None;
        let subject = SessionClaims::decode(token).ok().and_then(|c| c.subject);
        tracing::info!(subject = subject.as_deref().unwrap_or("-"), "session started");
        self.present.send_replace(true);
        let _ = self.events.send(AuthEvent::LoggedIn { subject });
        Ok(())
    }

    /// Explicit user logout.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the backend cannot remove the token.
    pub fn clear(&self) -> Result<(), AuthError> {
        let mut ended = self.lock();
        self.storage.remove()?;
        *ended = None;
        if self.present.send_replace(false) {
            tracing::info!("session cleared");
            let _ = self.events.send(AuthEvent::LoggedOut);
        }
        Ok(())
    }

    /// End the session if `token` is still the stored one.
    ///
    /// Returns `true` when this call cleared the token and emitted
    /// [`AuthEvent::LoginRequired`]; `false` when the token was already gone
    /// or has since been replaced by a new login.
    pub fn expire(&self, token: &str, reason: LogoutReason) -> bool {
        let mut ended = self.lock();
        if self.current(ended.as_deref()).as_deref() != Some(token) {
            return false;
        }
        *ended = match self.storage.remove() {
            Ok(()) => None,
            Err(error) => {
                tracing::warn!(%error, "failed to remove session token; ignoring it until next login");
                Some(token.to_string())
            }
        };
        self.present.send_replace(false);
        tracing::warn!(%reason, "session ended; login required");
        let _ = self.events.send(AuthEvent::LoginRequired { reason });
        true
    }

    /// Ask for the login screen when there is no session to end.
    pub fn require_login(&self, reason: LogoutReason) {
        tracing::debug!(%reason, "login required without an active session");
        let _ = self.events.send(AuthEvent::LoginRequired { reason });
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// Receiver that changes whenever a token is stored or removed.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<bool> {
        self.present.subscribe()
    }

    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.storage.describe()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.ended.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.storage.describe())
            .field("present", &*self.present.borrow())
            .finish_non_exhaustive()
    }
}
