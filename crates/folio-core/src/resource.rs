use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::CoreError;

/// Client-side validation run before a payload is sent.
pub trait Validate {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first offending field.
    fn validate(&self) -> Result<(), CoreError>;
}

/// A content resource managed through the admin console.
///
/// Binds the entity type to its REST collection (`/api/{PATH}/`) and to the
/// payload type accepted by create and update.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Payload: Serialize + Validate + Send + Sync;

    /// Collection segment under `/api/`.
    const PATH: &'static str;
    /// Human-readable singular name used in prompts and errors.
    const LABEL: &'static str;

    fn id(&self) -> i64;
    fn title(&self) -> &str;
}

/// Fail validation when a required text field is blank.
pub(crate) fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "is required"));
    }
    Ok(())
}

/// Fail validation when an optional URL field is present but not http(s).
pub(crate) fn optional_url(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(url) if !crate::security::is_valid_url(url) => Err(CoreError::validation(
            field,
            format!("'{url}' is not a valid http(s) URL"),
        )),
        _ => Ok(()),
    }
}
