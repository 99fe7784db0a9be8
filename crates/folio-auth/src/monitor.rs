//! Periodic session expiry checks.
//!
//! [`evaluate`] is the pure decision; [`SessionMonitor`] applies it to the
//! stored token on a fixed interval, publishes the expiry notice, and ends
//! the session through [`SessionStore::expire`] once the token is past its
//! `exp` or cannot be decoded.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use folio_config::SessionConfig;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::claims::SessionClaims;
use crate::clock::Clock;
use crate::session::{LogoutReason, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    Active,
    /// Token valid but at or inside the warning window.
    Warning { minutes_remaining: i64 },
    /// Token past `exp`, or undecodable.
    Expired,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSession => f.write_str("no session"),
            Self::Active => f.write_str("active"),
            Self::Warning { minutes_remaining } => {
                write!(f, "expiring ({minutes_remaining} min left)")
            }
            Self::Expired => f.write_str("expired"),
        }
    }
}

/// Classify `token` at `now`.
///
/// `Warning` covers `0 < remaining <= threshold`; the minute count is the
/// floor of the remaining seconds divided by 60.
#[must_use]
pub fn evaluate(token: Option<&str>, now: DateTime<Utc>, threshold: TimeDelta) -> SessionState {
    let Some(token) = token else {
        return SessionState::NoSession;
    };
    let Ok(claims) = SessionClaims::decode(token) else {
        return SessionState::Expired;
    };
    let remaining = claims.remaining(now);
    if remaining <= TimeDelta::zero() {
        SessionState::Expired
    } else if remaining <= threshold {
        SessionState::Warning {
            minutes_remaining: remaining.num_seconds() / 60,
        }
    } else {
        SessionState::Active
    }
}

/// The dismissible "session expiring soon" notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryNotice {
    pub minutes_remaining: i64,
}

impl ExpiryNotice {
    #[must_use]
    pub fn message(&self) -> String {
        let n = self.minutes_remaining;
        let plural = if n == 1 { "" } else { "s" };
        format!("Your session will expire in approximately {n} minute{plural}. Please save your work.")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
    pub warning_threshold: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for MonitorSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            warning_threshold: config.warning_threshold(),
        }
    }
}

pub struct SessionMonitor {
    store: Arc<SessionStore>,
    clock: Arc<dyn Clock>,
    settings: MonitorSettings,
    state: watch::Sender<SessionState>,
    notice: watch::Sender<Option<ExpiryNotice>>,
}

impl SessionMonitor {
    #[must_use]
    pub fn new(store: Arc<SessionStore>, clock: Arc<dyn Clock>, settings: MonitorSettings) -> Self {
        let (state, _) = watch::channel(SessionState::NoSession);
        let (notice, _) = watch::channel(None);
        Self {
            store,
            clock,
            settings,
            state,
            notice,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Receiver for state transitions.
    #[must_use]
    pub fn states(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Receiver for the expiry notice; `None` while hidden.
    #[must_use]
    pub fn notices(&self) -> watch::Receiver<Option<ExpiryNotice>> {
        self.notice.subscribe()
    }

    /// Hide the notice. The next check shows it again if still warning.
    pub fn dismiss(&self) {
        self.notice.send_replace(None);
    }

    /// Evaluate the stored token once and act on the result.
    pub fn check(&self) -> SessionState {
        let token = self.store.get();
        let threshold =
            TimeDelta::from_std(self.settings.warning_threshold).unwrap_or(TimeDelta::MAX);
        let state = evaluate(token.as_deref(), self.clock.now(), threshold);
        tracing::debug!(%state, "session check");

        match state {
            SessionState::Warning { minutes_remaining } => {
                self.notice.send_replace(Some(ExpiryNotice { minutes_remaining }));
            }
            SessionState::Expired => {
                self.notice.send_replace(None);
                if let Some(token) = token {
                    let reason = if SessionClaims::decode(&token).is_ok() {
                        LogoutReason::Expired
                    } else {
                        LogoutReason::Malformed
                    };
                    self.store.expire(&token, reason);
                }
            }
            SessionState::NoSession | SessionState::Active => {
                self.notice.send_replace(None);
            }
        }

        let previous = self.state.send_replace(state);
        if previous != state {
            tracing::info!(from = %previous, to = %state, "session state changed");
        }
        state
    }

    /// Check now, then on every interval tick and every token change, until
    /// `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let period = self.settings.poll_interval;
        let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut presence = self.store.watch();

        self.check();
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticks.tick() => {
                    self.check();
                }
                changed = presence.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.check();
                }
            }
        }
        tracing::debug!("session monitor stopped");
    }
}
