use folio_views::PublicationForm;
use folio_views::public::{self, PublicationEntry};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::content::{PaperCommands, PaperFields};
use crate::commands::shared::admin;
use crate::commands::shared::input::set_text;
use crate::context::AppContext;
use crate::output::output;

/// Handle `folio papers`.
pub async fn handle(
    action: &PaperCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PaperCommands::List => output(&public::publication_listing(&ctx.client).await?, flags.format),
        PaperCommands::Get { id } => {
            let publication = ctx.client.papers().get(*id).await?;
            let entry = PublicationEntry {
                doi_url: publication.doi_url(),
                publication,
            };
            output(&entry, flags.format)
        }
        PaperCommands::Create(fields) => {
            let paper = admin::create::<PublicationForm, _>(ctx, |form| apply(fields, form)).await?;
            output(&paper, flags.format)
        }
        PaperCommands::Update { id, fields } => {
            let paper =
                admin::update::<PublicationForm, _>(ctx, *id, |form| apply(fields, form)).await?;
            output(&paper, flags.format)
        }
        PaperCommands::Delete(args) => {
            output(&admin::delete::<PublicationForm>(ctx, args).await?, flags.format)
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn apply(fields: &PaperFields, form: &mut PublicationForm) -> anyhow::Result<()> {
    set_text(&mut form.title, fields.title.as_ref());
    set_text(&mut form.authors, fields.authors.as_ref());
    set_text(&mut form.journal, fields.journal.as_ref());
    set_text(&mut form.doi, fields.doi.as_ref());
    set_text(&mut form.pdf_url, fields.pdf_url.as_ref());
    set_text(&mut form.abstract_text, fields.abstract_text.as_ref());
    set_text(&mut form.citation, fields.citation.as_ref());
    if let Some(year) = fields.year {
        form.year = year;
    }
    if let Some(order) = fields.order {
        form.order = order;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_views::EditForm;
    use pretty_assertions::assert_eq;

    #[test]
    fn doi_link_is_normalized_in_payload() {
        let mut form = PublicationForm {
            title: String::new(),
            authors: String::new(),
            journal: String::new(),
            year: 2026,
            doi: String::new(),
            pdf_url: String::new(),
            abstract_text: String::new(),
            citation: String::new(),
            order: 0,
        };
        let fields = PaperFields {
            title: Some("Paper".into()),
            authors: Some("A. Author".into()),
            doi: Some("https://doi.org/10.1000/xyz".into()),
            ..PaperFields::default()
        };

        apply(&fields, &mut form).unwrap();
        let payload = form.to_payload();

        assert_eq!(payload.doi.as_deref(), Some("10.1000/xyz"));
        assert_eq!(payload.year, Some(2026));
    }
}
