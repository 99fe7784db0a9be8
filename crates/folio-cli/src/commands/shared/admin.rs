//! Drives a guarded [`AdminView`] through one create, update or delete.
//!
//! Every write mounts the view first, so a missing or rejected session fails
//! before any resource call and the router sees a single login event.

use anyhow::Context;
use folio_views::{AdminView, EditForm};
use serde::Serialize;

use crate::cli::subcommands::content::DeleteArgs;
use crate::commands::shared::errors::explain;
use crate::commands::shared::input;
use crate::context::AppContext;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: i64,
    pub deleted: bool,
}

pub async fn mount<F: EditForm>(ctx: &AppContext) -> anyhow::Result<AdminView<F>> {
    let mut view = AdminView::<F>::new(&ctx.client, ctx.form_defaults());
    view.mount().await.map_err(explain)?;
    if let Some(identity) = view.identity() {
        tracing::debug!(username = %identity.username, "admin view mounted");
    }
    Ok(view)
}

/// Open a blank form, let `apply` fill it, and save.
pub async fn create<F, A>(ctx: &AppContext, apply: A) -> anyhow::Result<F::Resource>
where
    F: EditForm,
    A: FnOnce(&mut F) -> anyhow::Result<()>,
{
    let mut view = mount::<F>(ctx).await?;
    view.start_create().map_err(explain)?;
    fill_and_submit(&mut view, apply).await
}

/// Open the form for `id`, let `apply` change it, and save.
pub async fn update<F, A>(ctx: &AppContext, id: i64, apply: A) -> anyhow::Result<F::Resource>
where
    F: EditForm,
    A: FnOnce(&mut F) -> anyhow::Result<()>,
{
    let mut view = mount::<F>(ctx).await?;
    view.start_edit(id).await.map_err(explain)?;
    fill_and_submit(&mut view, apply).await
}

async fn fill_and_submit<F, A>(view: &mut AdminView<F>, apply: A) -> anyhow::Result<F::Resource>
where
    F: EditForm,
    A: FnOnce(&mut F) -> anyhow::Result<()>,
{
    let form = view.form_mut().context("admin view has no open form")?;
    apply(form)?;
    view.submit().await.map_err(explain)
}

/// Delete after confirmation on stdin, or straight away with `--yes`.
pub async fn delete<F: EditForm>(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<DeleteResponse> {
    let mut view = mount::<F>(ctx).await?;
    let deleted = if args.yes {
        view.delete(args.id, &|_: &str| true).await
    } else {
        view.delete(args.id, &input::confirm_on_stdin).await
    }
    .map_err(explain)?;
    Ok(DeleteResponse {
        id: args.id,
        deleted,
    })
}
