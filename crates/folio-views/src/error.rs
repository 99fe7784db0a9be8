use folio_client::{ClientError, ErrorKind};
use folio_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// The view gave up its session; the router is taking the user to login.
    #[error("login required")]
    LoginRequired,

    #[error("Please wait {wait_secs} seconds before trying again")]
    Throttled { wait_secs: u64 },
}

impl ViewError {
    /// Classification for display, following the client's taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Client(err) => err.kind(),
            Self::LoginRequired => ErrorKind::Unauthorized,
            Self::Core(_) => ErrorKind::Validation,
            Self::Throttled { .. } => ErrorKind::Retryable,
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Client(ClientError::Cancelled))
    }
}
