use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed session token: {0}")]
    MalformedToken(String),

    #[error("keyring error: {0}")]
    KeyringError(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),
}
