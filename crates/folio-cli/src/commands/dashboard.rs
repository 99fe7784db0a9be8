use folio_views::dashboard::load_dashboard;
use tokio_util::sync::CancellationToken;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::explain;
use crate::context::AppContext;
use crate::output::output;

/// Handle `folio dashboard`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = load_dashboard(&ctx.client, &CancellationToken::new())
        .await
        .map_err(explain)?;
    output(&stats, flags.format)
}
