use base64::Engine as _;
use chrono::{DateTime, TimeDelta, Utc};

use crate::error::AuthError;

/// Claims read from the payload segment of a session token.
///
/// Decoding does NOT verify the signature; the server remains the authority
/// on validity. The client only needs `exp` to schedule warnings and logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// `sub` claim (the admin username), when present.
    pub subject: Option<String>,
    /// Expiry from the `exp` claim (seconds since epoch).
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Decode the `sub` and `exp` claims from a JWT-shaped token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MalformedToken` if the token does not have three
    /// segments, the payload is not base64url JSON, or `exp` is missing or
    /// out of range.
    pub fn decode(token: &str) -> Result<Self, AuthError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(AuthError::MalformedToken("invalid JWT format".into()));
        }
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| AuthError::MalformedToken(format!("base64 decode failed: {e}")))?;
        let value: serde_json::Value = serde_json::from_slice(&payload)
            .map_err(|e| AuthError::MalformedToken(format!("JSON parse failed: {e}")))?;

        let exp = value["exp"]
            .as_i64()
            .or_else(|| value["exp"].as_f64().map(|f| f.floor() as i64))
            .ok_or_else(|| AuthError::MalformedToken("missing exp claim".into()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::MalformedToken("invalid exp timestamp".into()))?;

        Ok(Self {
            subject: value["sub"].as_str().map(ToString::to_string),
            expires_at,
        })
    }

    /// Time left until expiry; negative once expired.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        self.expires_at - now
    }
}
