use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    authenticated: bool,
    had_session: bool,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let had_session = ctx.session().get().is_some();
    ctx.client.auth().logout()?;
    output(
        &AuthLogoutResponse {
            authenticated: false,
            had_session,
        },
        flags.format,
    )
}
