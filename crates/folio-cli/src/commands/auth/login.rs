use anyhow::Context;
use chrono::{DateTime, Utc};
use folio_auth::SessionClaims;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::commands::shared::input;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    username: String,
    expires_at: Option<DateTime<Utc>>,
    storage: &'static str,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => input::read_line("Password: ")?,
    };

    let response = ctx
        .client
        .auth()
        .login(&args.username, &password)
        .await
        .context("login failed")?;

    let claims = SessionClaims::decode(&response.token).ok();
    output(
        &AuthLoginResponse {
            authenticated: true,
            username: claims
                .as_ref()
                .and_then(|c| c.subject.clone())
                .unwrap_or_else(|| args.username.clone()),
            expires_at: claims.map(|c| c.expires_at),
            storage: ctx.session().backend(),
        },
        flags.format,
    )
}
