use folio_auth::evaluate;

use crate::cli::GlobalFlags;
use crate::commands::shared::session::{SessionReport, threshold};
use crate::context::AppContext;
use crate::output::output;

/// Report the stored token as the monitor would see it, without acting on it.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let token = ctx.session().get();
    let settings = ctx.monitor_settings();
    let state = evaluate(
        token.as_deref(),
        ctx.clock.now(),
        threshold(settings.warning_threshold),
    );
    let report = SessionReport::new(state, token.as_deref(), ctx.session().backend());
    output(&report, flags.format)
}
