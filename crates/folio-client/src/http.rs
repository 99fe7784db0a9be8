//! Shared HTTP response helpers.
//!
//! Non-success statuses become [`ClientError::Api`] with the server's
//! `detail` message when the body carries one, so resource modules only
//! build requests and map bodies.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Check a response for a non-success status.
///
/// Returns the response unchanged on success. 401 handling happens before
/// this in [`crate::ApiClient`]; a 401 that reaches here was sent without a
/// token and is reported like any other status.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status,
        message: error_message(&body),
    })
}

/// Read a JSON body into `T`.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let bytes = resp.bytes().await.map_err(ClientError::Network)?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Pull a readable message out of an error body.
///
/// Handles `{"detail": "..."}`, the validation form
/// `{"detail": [{"loc": [...], "msg": "..."}]}`, and falls back to the raw
/// body text.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    match &value["detail"] {
        serde_json::Value::String(detail) => detail.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| {
                let msg = item["msg"].as_str().unwrap_or("invalid value");
                match item["loc"].as_array().and_then(|loc| loc.last()) {
                    Some(serde_json::Value::String(field)) => format!("{field}: {msg}"),
                    _ => msg.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_string(),
    }
}
