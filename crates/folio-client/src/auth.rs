//! Login and server-side session verification.

use folio_core::CoreError;
use folio_core::identity::{AdminIdentity, LoginRequest, LoginResponse, VerifyResponse};

use crate::client::ApiClient;
use crate::error::ClientError;

const LOGIN_PATH: &str = "/api/auth/login";
const VERIFY_PATH: &str = "/api/auth/verify";

#[derive(Debug, Clone)]
pub struct AuthApi {
    api: ApiClient,
}

impl AuthApi {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token and store it in the session.
    ///
    /// Sent without any stored token, so bad credentials never end an
    /// existing session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for blank credentials,
    /// [`ClientError::Api`] with status 401 for rejected ones, or
    /// [`ClientError::Session`] if the token cannot be stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        if username.trim().is_empty() {
            return Err(CoreError::validation("username", "is required").into());
        }
        if password.is_empty() {
            return Err(CoreError::validation("password", "is required").into());
        }
        let resp: LoginResponse = self
            .api
            .send_anonymous(LOGIN_PATH, &LoginRequest { username, password })
            .await?;
        self.api.session().set(&resp.token)?;
        Ok(resp)
    }

    /// Ask the server whether the stored token is still valid.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] if the server rejects the token
    /// (the session has then already been ended).
    pub async fn verify(&self) -> Result<AdminIdentity, ClientError> {
        let resp: VerifyResponse = self.api.get_json(VERIFY_PATH).await?;
        if !resp.authenticated {
            return Err(ClientError::Unauthorized);
        }
        Ok(resp.into_identity())
    }

    /// Explicit logout: forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Session`] if the token cannot be removed.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.api.session().clear()?;
        Ok(())
    }
}
