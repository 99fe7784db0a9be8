//! Unsigned token builders for tests.

use base64::Engine as _;
use chrono::{TimeDelta, Utc};

/// A JWT-shaped token whose `exp` claim is `exp` (seconds since epoch).
#[must_use]
pub fn token_expiring_at(subject: &str, exp: i64) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = engine.encode(format!(r#"{{"sub":"{subject}","exp":{exp}}}"#));
    let signature = engine.encode("unsigned");
    format!("{header}.{payload}.{signature}")
}

/// A token for `subject` that expires `lifetime` from the system clock.
#[must_use]
pub fn token_expiring_in(subject: &str, lifetime: TimeDelta) -> String {
    token_expiring_at(subject, (Utc::now() + lifetime).timestamp())
}
