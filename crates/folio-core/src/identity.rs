use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The administrator a bearer token belongs to, as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AdminIdentity {
    pub username: String,
}

/// Body of `GET /api/auth/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerifyResponse {
    #[serde(default = "default_true")]
    pub authenticated: bool,
    pub username: String,
}

impl VerifyResponse {
    #[must_use]
    pub fn into_identity(self) -> AdminIdentity {
        AdminIdentity {
            username: self.username,
        }
    }
}

/// Body of `POST /api/auth/login`.
///
/// The API names the field `access_token`; `token` is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Body sent to `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

const fn default_true() -> bool {
    true
}
