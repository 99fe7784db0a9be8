//! Client error types.

use std::time::Duration;

use folio_auth::AuthError;
use folio_core::CoreError;
use thiserror::Error;

/// How a failure should be surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, timeout or server trouble; the user may retry.
    Retryable,
    /// The credential was rejected; the user must log in again.
    Unauthorized,
    /// The input was rejected, locally or by the server.
    Validation,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A 401 for a request that carried the session token.
    #[error("session rejected by the server; log in again")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Session(#[from] AuthError),
}

impl ClientError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized | Self::Session(_) | Self::Api { status: 401, .. } => {
                ErrorKind::Unauthorized
            }
            Self::Validation(_)
            | Self::InvalidBaseUrl { .. }
            | Self::Api {
                status: 400 | 422, ..
            } => ErrorKind::Validation,
            _ => ErrorKind::Retryable,
        }
    }
}
