use folio_client::contact::INBOX_PAGE;
use folio_core::entities::ContactPayload;
use folio_views::guard::guard;
use folio_views::public::ContactForm;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ContactCommands;
use crate::cli::subcommands::contact::ContactSendArgs;
use crate::commands::shared::errors::explain;
use crate::commands::shared::{input, limit};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ContactSendResponse {
    sent: bool,
    email: String,
}

/// Handle `folio contact`.
pub async fn handle(
    action: &ContactCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ContactCommands::Send(args) => {
            let payload = payload(args)?;
            ContactForm::new(&ctx.client).submit(&payload).await?;
            output(
                &ContactSendResponse {
                    sent: true,
                    email: payload.email,
                },
                flags.format,
            )
        }
        ContactCommands::List(page) => {
            guard(&ctx.client.auth(), ctx.session(), &CancellationToken::new())
                .await
                .map_err(explain)?;
            let window = limit::window(page, flags, INBOX_PAGE.limit);
            let messages = ctx.client.contact().list(Some(window)).await?;
            output(&messages, flags.format)
        }
    }
}

fn payload(args: &ContactSendArgs) -> anyhow::Result<ContactPayload> {
    let message = input::text_or_file(args.message.as_deref(), args.message_file.as_deref())?
        .unwrap_or_default();
    Ok(ContactPayload {
        name: args.name.clone(),
        email: args.email.clone(),
        subject: args.subject.clone(),
        message,
    })
}
