use folio_views::guard::guard;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::explain;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthVerifyResponse {
    authenticated: bool,
    username: String,
}

/// Ask the server; a rejected token is cleared.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = guard(&ctx.client.auth(), ctx.session(), &CancellationToken::new())
        .await
        .map_err(explain)?;
    output(
        &AuthVerifyResponse {
            authenticated: true,
            username: identity.username,
        },
        flags.format,
    )
}
