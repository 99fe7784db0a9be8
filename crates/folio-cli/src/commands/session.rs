use std::sync::Arc;

use folio_auth::{SessionMonitor, SessionState};
use tokio_util::sync::CancellationToken;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::commands::shared::session::SessionReport;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

/// Handle `folio session`.
pub async fn handle(
    action: &SessionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SessionCommands::Watch { once } => watch(ctx, flags, *once).await,
    }
}

fn report(ctx: &AppContext, state: SessionState) -> SessionReport {
    let token = ctx.session().get();
    SessionReport::new(state, token.as_deref(), ctx.session().backend())
}

/// Run the session monitor until the session ends or Ctrl-C, printing each
/// state change and showing the expiry notice on stderr.
async fn watch(ctx: &AppContext, flags: &GlobalFlags, once: bool) -> anyhow::Result<()> {
    let monitor = SessionMonitor::new(
        Arc::clone(ctx.session()),
        Arc::clone(&ctx.clock),
        ctx.monitor_settings(),
    );

    if once {
        // Read the token first: an expired one is cleared by the check.
        let token = ctx.session().get();
        let state = monitor.check();
        let report = SessionReport::new(state, token.as_deref(), ctx.session().backend());
        return output(&report, flags.format);
    }

    let mut states = monitor.states();
    let mut notices = monitor.notices();
    let cancel = CancellationToken::new();
    let run = monitor.run(cancel.clone());
    tokio::pin!(run);

    let mut last: Option<SessionState> = None;
    let mut last_notice = None;
    loop {
        tokio::select! {
            () = &mut run => break,
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted");
                cancel.cancel();
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *states.borrow_and_update();
                if last == Some(state) {
                    continue;
                }
                last = Some(state);
                output(&report(ctx, state), flags.format)?;
                if matches!(state, SessionState::NoSession | SessionState::Expired) {
                    cancel.cancel();
                }
            }
            changed = notices.changed() => {
                if changed.is_err() {
                    break;
                }
                let notice = notices.borrow_and_update().clone();
                if let Some(current) = &notice
                    && last_notice.as_ref() != Some(current)
                    && !flags.quiet
                {
                    ui::notice(&current.message());
                }
                last_notice = notice;
            }
        }
    }
    Ok(())
}
