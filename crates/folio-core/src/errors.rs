//! Cross-cutting error types for Folio.
//!
//! Transport and session errors live in `folio-client` and `folio-auth`.
//! This module only covers failures that any crate can raise about the
//! domain data itself.

use thiserror::Error;

/// Errors that can be raised by any Folio crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// A payload failed client-side validation.
    #[error("Validation error: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::Validation`] on one field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = CoreError::validation("title", "is required");
        assert_eq!(err.to_string(), "Validation error: title: is required");
    }

    #[test]
    fn not_found_message() {
        let err = CoreError::NotFound {
            entity_type: "blog post".into(),
            id: "5".into(),
        };
        assert_eq!(err.to_string(), "Entity not found: blog post 5");
    }
}
