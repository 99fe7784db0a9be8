//! # folio-auth
//!
//! Admin session handling for the Folio client: where the token lives,
//! what its claims say about expiry, and the background monitor that warns
//! before expiry and ends the session after it.
//!
//! ## Storage
//!
//! Backends are chosen by `session.storage` in the config:
//!
//! 1. `keyring`: OS keychain, falling back to the credentials file on error
//! 2. `file`: `~/.folio/adminToken` (0600)
//! 3. `memory`: process-local, gone on exit
//!
//! ## Ending a session
//!
//! [`SessionStore::expire`] is the only path for involuntary logout. It
//! clears the token only if it is still the one the caller acted on, and
//! emits [`AuthEvent::LoginRequired`] for the router at most once per token.

pub mod claims;
pub mod clock;
pub mod error;
pub mod monitor;
pub mod session;
pub mod storage;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use claims::SessionClaims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::AuthError;
pub use monitor::{ExpiryNotice, MonitorSettings, SessionMonitor, SessionState, evaluate};
pub use session::{AuthEvent, LogoutReason, SessionStore};
pub use storage::TokenStorage;

use folio_config::SessionConfig;

/// Open the session store configured by `config`.
///
/// # Errors
///
/// Returns `AuthError` if the configured backend cannot be set up.
pub fn open_store(config: &SessionConfig) -> Result<SessionStore, AuthError> {
    let storage = storage::from_config(config)?;
    tracing::debug!(backend = storage.describe(), "session storage opened");
    Ok(SessionStore::new(storage))
}
