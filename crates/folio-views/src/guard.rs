//! Mount-time session check for admin screens.

use folio_auth::{LogoutReason, SessionStore};
use folio_client::{AuthApi, ClientError, with_cancel};
use folio_core::identity::AdminIdentity;
use tokio_util::sync::CancellationToken;

use crate::error::ViewError;

/// Confirm the stored session with the server before any data loads.
///
/// With no token, asks for login without sending anything. If the server
/// rejects the token for any reason other than cancellation, the session is
/// ended so the router redirects.
///
/// # Errors
///
/// Returns [`ViewError::LoginRequired`] when the guard fails, or the
/// cancelled client error if `cancel` fires first.
pub async fn guard(
    auth: &AuthApi,
    session: &SessionStore,
    cancel: &CancellationToken,
) -> Result<AdminIdentity, ViewError> {
    let Some(token) = session.get() else {
        session.require_login(LogoutReason::NoSession);
        return Err(ViewError::LoginRequired);
    };

    match with_cancel(cancel, auth.verify()).await {
        Ok(identity) => {
            tracing::debug!(username = %identity.username, "session verified");
            Ok(identity)
        }
        Err(ClientError::Cancelled) => Err(ClientError::Cancelled.into()),
        Err(error) => {
            tracing::warn!(%error, "session verification failed");
            // No-op when the 401 handler already ended this session.
            session.expire(&token, LogoutReason::Rejected);
            Err(ViewError::LoginRequired)
        }
    }
}
