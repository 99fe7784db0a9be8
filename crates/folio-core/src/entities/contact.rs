use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::resource::{Validate, require};
use crate::security::is_valid_email;

/// A message submitted through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(with = "crate::datetime::utc")]
    #[schemars(with = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

/// Body sent to `POST /api/contact/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl Validate for ContactPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        if !is_valid_email(self.email.trim()) {
            return Err(CoreError::validation("email", "is not a valid email address"));
        }
        require("message", &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(email: &str) -> ContactPayload {
        ContactPayload {
            name: "Ada".into(),
            email: email.into(),
            subject: None,
            message: "Hello".into(),
        }
    }

    #[test]
    fn accepts_well_formed_submission() {
        assert!(payload("ada@example.org").validate().is_ok());
    }

    #[test]
    fn rejects_bad_email() {
        let err = payload("ada-at-example").validate().unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn reads_backend_message() {
        let msg: ContactMessage = serde_json::from_str(
            r#"{"id":3,"name":"Ada","email":"ada@example.org","subject":null,
                "message":"hi","created_at":"2024-05-01T10:00:00","read":false}"#,
        )
        .unwrap();
        assert_eq!(msg.id, 3);
        assert!(!msg.read);
    }
}
