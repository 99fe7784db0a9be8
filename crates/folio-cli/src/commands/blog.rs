use folio_views::BlogForm;
use folio_views::public;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::content::{BlogCommands, BlogFields};
use crate::commands::shared::input::{set_text, text_or_file};
use crate::commands::shared::{admin, limit};
use crate::context::AppContext;
use crate::output::output;

/// Handle `folio blog`.
pub async fn handle(
    action: &BlogCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        BlogCommands::List(page) => {
            let window = limit::window(page, flags, ctx.config.admin.page_size);
            let posts = public::blog_index(&ctx.client, window).await?;
            output(&posts, flags.format)
        }
        BlogCommands::Get { id } => {
            let post = public::blog_detail(&ctx.client, *id).await?;
            output(&post, flags.format)
        }
        BlogCommands::Create(fields) => {
            let content = text_or_file(fields.content.as_deref(), fields.content_file.as_deref())?;
            let post =
                admin::create::<BlogForm, _>(ctx, |form| apply(fields, content, form)).await?;
            output(&post, flags.format)
        }
        BlogCommands::Update { id, fields } => {
            let content = text_or_file(fields.content.as_deref(), fields.content_file.as_deref())?;
            let post =
                admin::update::<BlogForm, _>(ctx, *id, |form| apply(fields, content, form)).await?;
            output(&post, flags.format)
        }
        BlogCommands::Delete(args) => {
            let response = admin::delete::<BlogForm>(ctx, args).await?;
            output(&response, flags.format)
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn apply(fields: &BlogFields, content: Option<String>, form: &mut BlogForm) -> anyhow::Result<()> {
    set_text(&mut form.title, fields.title.as_ref());
    if let Some(content) = content {
        form.content = content;
    }
    set_text(&mut form.excerpt, fields.excerpt.as_ref());
    set_text(&mut form.author, fields.author.as_ref());
    set_text(&mut form.tags, fields.tags.as_ref());
    if let Some(published) = fields.published {
        form.published = published;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blank() -> BlogForm {
        BlogForm {
            title: String::new(),
            content: String::new(),
            excerpt: String::new(),
            author: "Your Name".into(),
            published: true,
            tags: String::new(),
        }
    }

    #[test]
    fn unset_flags_keep_form_defaults() {
        let mut form = blank();
        let fields = BlogFields {
            title: Some("Notes".into()),
            ..BlogFields::default()
        };

        apply(&fields, Some("# Body".into()), &mut form).unwrap();

        assert_eq!(form.title, "Notes");
        assert_eq!(form.content, "# Body");
        assert_eq!(form.author, "Your Name");
        assert!(form.published);
    }

    #[test]
    fn published_flag_can_unpublish() {
        let mut form = blank();
        let fields = BlogFields {
            published: Some(false),
            tags: Some("rust, notes".into()),
            ..BlogFields::default()
        };

        apply(&fields, None, &mut form).unwrap();

        assert!(!form.published);
        assert_eq!(form.tags, "rust, notes");
        assert_eq!(form.content, "");
    }
}
