use chrono::{DateTime, TimeDelta, Utc};
use folio_auth::{SessionClaims, SessionState};
use serde::Serialize;

/// What the CLI reports about the stored session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub state: String,
    pub authenticated: bool,
    pub username: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub minutes_remaining: Option<i64>,
    pub storage: &'static str,
}

impl SessionReport {
    #[must_use]
    pub fn new(state: SessionState, token: Option<&str>, storage: &'static str) -> Self {
        let claims = token.and_then(|token| SessionClaims::decode(token).ok());
        let minutes_remaining = match state {
            SessionState::Warning { minutes_remaining } => Some(minutes_remaining),
            _ => None,
        };
        Self {
            state: state_name(state).to_string(),
            authenticated: matches!(state, SessionState::Active | SessionState::Warning { .. }),
            username: claims.as_ref().and_then(|c| c.subject.clone()),
            expires_at: claims.map(|c| c.expires_at),
            minutes_remaining,
            storage,
        }
    }
}

/// Short state label for tables and JSON.
#[must_use]
pub const fn state_name(state: SessionState) -> &'static str {
    match state {
        SessionState::NoSession => "no session",
        SessionState::Active => "active",
        SessionState::Warning { .. } => "warning",
        SessionState::Expired => "expired",
    }
}

/// The configured warning window as a chrono delta.
#[must_use]
pub fn threshold(window: std::time::Duration) -> TimeDelta {
    TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX)
}
