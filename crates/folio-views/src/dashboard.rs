//! Admin landing screen: who is logged in and how much content exists.

use folio_client::{ApiClient, ClientError, with_cancel};
use folio_core::Pagination;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::ViewError;
use crate::guard::guard;

/// Blog posts counted on the dashboard.
pub const BLOG_COUNT_WINDOW: Pagination = Pagination::new(0, 100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub username: String,
    pub blogs: usize,
    pub research: usize,
    pub papers: usize,
}

/// Guard the session, then count all three collections concurrently.
///
/// # Errors
///
/// Returns [`ViewError::LoginRequired`] if the guard fails or any count is
/// rejected with a 401, otherwise the first client error.
pub async fn load_dashboard(
    client: &ApiClient,
    cancel: &CancellationToken,
) -> Result<DashboardStats, ViewError> {
    let identity = guard(&client.auth(), client.session(), cancel).await?;

    let (blogs, research, papers) = (client.blogs(), client.research(), client.papers());
    let counts = with_cancel(cancel, async {
        tokio::try_join!(
            blogs.list(Some(BLOG_COUNT_WINDOW)),
            research.list(None),
            papers.list(None),
        )
    })
    .await;

    match counts {
        Ok((blogs, research, papers)) => Ok(DashboardStats {
            username: identity.username,
            blogs: blogs.len(),
            research: research.len(),
            papers: papers.len(),
        }),
        Err(ClientError::Unauthorized) => Err(ViewError::LoginRequired),
        Err(other) => Err(other.into()),
    }
}
