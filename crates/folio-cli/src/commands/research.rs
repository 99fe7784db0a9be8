use folio_core::enums::ProjectStatus;
use folio_views::ResearchForm;
use folio_views::public;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::content::{ResearchCommands, ResearchFields};
use crate::commands::shared::admin;
use crate::commands::shared::input::{set_text, text_or_file};
use crate::context::AppContext;
use crate::output::output;

/// Handle `folio research`.
pub async fn handle(
    action: &ResearchCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ResearchCommands::List => output(&public::research_listing(&ctx.client).await?, flags.format),
        ResearchCommands::Get { id } => {
            output(&public::research_detail(&ctx.client, *id).await?, flags.format)
        }
        ResearchCommands::Create(fields) => {
            let description = description(fields)?;
            let project =
                admin::create::<ResearchForm, _>(ctx, |form| apply(fields, description, form))
                    .await?;
            output(&project, flags.format)
        }
        ResearchCommands::Update { id, fields } => {
            let description = description(fields)?;
            let project =
                admin::update::<ResearchForm, _>(ctx, *id, |form| apply(fields, description, form))
                    .await?;
            output(&project, flags.format)
        }
        ResearchCommands::Delete(args) => {
            output(&admin::delete::<ResearchForm>(ctx, args).await?, flags.format)
        }
    }
}

fn description(fields: &ResearchFields) -> anyhow::Result<Option<String>> {
    text_or_file(fields.description.as_deref(), fields.description_file.as_deref())
}

fn apply(
    fields: &ResearchFields,
    description: Option<String>,
    form: &mut ResearchForm,
) -> anyhow::Result<()> {
    set_text(&mut form.title, fields.title.as_ref());
    if let Some(description) = description {
        form.description = description;
    }
    set_text(&mut form.image_url, fields.image_url.as_ref());
    set_text(&mut form.project_url, fields.project_url.as_ref());
    set_text(&mut form.technologies, fields.technologies.as_ref());
    set_text(&mut form.start_date, fields.start_date.as_ref());
    set_text(&mut form.end_date, fields.end_date.as_ref());
    if let Some(status) = &fields.status {
        form.status = status.parse::<ProjectStatus>()?;
    }
    if let Some(order) = fields.order {
        form.order = order;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blank() -> ResearchForm {
        ResearchForm {
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            project_url: String::new(),
            technologies: String::new(),
            status: ProjectStatus::default(),
            start_date: String::new(),
            end_date: String::new(),
            order: 0,
        }
    }

    #[test]
    fn status_is_parsed_case_insensitively() {
        let mut form = blank();
        let fields = ResearchFields {
            status: Some("ongoing".into()),
            order: Some(3),
            ..ResearchFields::default()
        };

        apply(&fields, None, &mut form).unwrap();

        assert_eq!(form.status, ProjectStatus::Ongoing);
        assert_eq!(form.order, 3);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut form = blank();
        let fields = ResearchFields {
            status: Some("abandoned".into()),
            ..ResearchFields::default()
        };

        let err = apply(&fields, None, &mut form).unwrap_err();
        assert!(err.to_string().contains("abandoned"));
    }
}
