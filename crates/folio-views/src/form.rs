//! Editable form state for the admin screens.
//!
//! Forms hold plain strings the way an input field does; blank optional
//! fields become `None` only when the payload is built.

use chrono::Datelike;
use folio_auth::Clock;
use folio_config::AdminConfig;
use folio_core::entities::{
    BlogPost, BlogPostPayload, Publication, PublicationPayload, ResearchProject,
    ResearchProjectPayload,
};
use folio_core::enums::ProjectStatus;
use folio_core::{Pagination, Resource};

/// Values a blank form starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub author: String,
    pub current_year: i32,
    pub page_size: u32,
}

impl FormDefaults {
    #[must_use]
    pub fn new(config: &AdminConfig, clock: &dyn Clock) -> Self {
        Self {
            author: config.default_author.clone(),
            current_year: clock.now().year(),
            page_size: config.page_size,
        }
    }
}

/// Form state for creating or editing one kind of resource.
pub trait EditForm: Clone + Send + Sync + 'static {
    type Resource: Resource;

    /// The form shown for "new".
    fn blank(defaults: &FormDefaults) -> Self;

    /// The form pre-filled from an existing item.
    fn from_item(item: &<Self as EditForm>::Resource, defaults: &FormDefaults) -> Self;

    fn to_payload(&self) -> <<Self as EditForm>::Resource as Resource>::Payload;

    /// Window the listing fetches; `None` lists the whole collection.
    fn list_window(_defaults: &FormDefaults) -> Option<Pagination> {
        None
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogForm {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub published: bool,
    pub tags: String,
}

impl EditForm for BlogForm {
    type Resource = BlogPost;

    fn blank(defaults: &FormDefaults) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            excerpt: String::new(),
            author: defaults.author.clone(),
            published: true,
            tags: String::new(),
        }
    }

    fn from_item(item: &BlogPost, _defaults: &FormDefaults) -> Self {
        Self {
            title: item.title.clone(),
            content: item.content.clone(),
            excerpt: text(item.excerpt.as_ref()),
            author: text(item.author.as_ref()),
            published: item.is_published(),
            tags: text(item.tags.as_ref()),
        }
    }

    fn to_payload(&self) -> BlogPostPayload {
        BlogPostPayload {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            excerpt: optional(&self.excerpt),
            author: optional(&self.author),
            published: self.published,
            tags: optional(&self.tags),
        }
    }

    fn list_window(defaults: &FormDefaults) -> Option<Pagination> {
        Some(Pagination::new(0, defaults.page_size))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchForm {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_url: String,
    pub technologies: String,
    pub status: ProjectStatus,
    pub start_date: String,
    pub end_date: String,
    pub order: i32,
}

impl EditForm for ResearchForm {
    type Resource = ResearchProject;

    fn blank(_defaults: &FormDefaults) -> Self {
        Self {
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

    fn from_item(item: &ResearchProject, _defaults: &FormDefaults) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            image_url: text(item.image_url.as_ref()),
            project_url: text(item.project_url.as_ref()),
            technologies: text(item.technologies.as_ref()),
            status: item.status(),
            start_date: text(item.start_date.as_ref()),
            end_date: text(item.end_date.as_ref()),
            order: item.order.unwrap_or(0),
        }
    }

    fn to_payload(&self) -> ResearchProjectPayload {
        ResearchProjectPayload {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            image_url: optional(&self.image_url),
            project_url: optional(&self.project_url),
            technologies: optional(&self.technologies),
            status: self.status,
            start_date: optional(&self.start_date),
            end_date: optional(&self.end_date),
            order: self.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationForm {
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub year: i32,
    pub doi: String,
    pub pdf_url: String,
    pub abstract_text: String,
    pub citation: String,
    pub order: i32,
}

impl EditForm for PublicationForm {
    type Resource = Publication;

    fn blank(defaults: &FormDefaults) -> Self {
        Self {
            title: String::new(),
            authors: String::new(),
            journal: String::new(),
            year: defaults.current_year,
            doi: String::new(),
            pdf_url: String::new(),
            abstract_text: String::new(),
            citation: String::new(),
            order: 0,
        }
    }

    fn from_item(item: &Publication, defaults: &FormDefaults) -> Self {
        Self {
            title: item.title.clone(),
            authors: item.authors.clone(),
            journal: text(item.journal.as_ref()),
            year: item.year.unwrap_or(defaults.current_year),
            doi: text(item.doi.as_ref()),
            pdf_url: text(item.pdf_url.as_ref()),
            abstract_text: text(item.abstract_text.as_ref()),
            citation: text(item.citation.as_ref()),
            order: item.order.unwrap_or(0),
        }
    }

    fn to_payload(&self) -> PublicationPayload {
        PublicationPayload {
            title: self.title.trim().to_string(),
            authors: self.authors.trim().to_string(),
            journal: optional(&self.journal),
            year: Some(self.year),
            doi: optional(&self.doi).map(|doi| PublicationPayload::normalize_doi(&doi)),
            pdf_url: optional(&self.pdf_url),
            abstract_text: optional(&self.abstract_text),
            citation: optional(&self.citation),
            order: self.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use folio_auth::ManualClock;
    use pretty_assertions::assert_eq;

    fn defaults() -> FormDefaults {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
        FormDefaults::new(&AdminConfig::default(), &clock)
    }

    #[test]
    fn blank_blog_uses_default_author() {
        let form = BlogForm::blank(&defaults());
        assert_eq!(form.author, "Your Name");
        assert!(form.published);
        assert_eq!(BlogForm::list_window(&defaults()), Some(Pagination::new(0, 10)));
    }

    #[test]
    fn publication_falls_back_to_current_year_and_zero_order() {
        let item: Publication = serde_json::from_value(serde_json::json!({
            "id": 4, "title": "Paper", "authors": "A. Author"
        }))
        .unwrap();
        let form = PublicationForm::from_item(&item, &defaults());
        assert_eq!(form.year, 2026);
        assert_eq!(form.order, 0);
        assert_eq!(form.journal, "");
        assert_eq!(PublicationForm::list_window(&defaults()), None);
    }

    #[test]
    fn research_item_round_trips_to_payload() {
        let item: ResearchProject = serde_json::from_value(serde_json::json!({
            "id": 2, "title": "Project", "description": "Text",
            "technologies": "Rust, Tokio", "status": "Ongoing", "order": 3
        }))
        .unwrap();
        let payload = ResearchForm::from_item(&item, &defaults()).to_payload();
        assert_eq!(payload.status, ProjectStatus::Ongoing);
        assert_eq!(payload.order, 3);
        assert_eq!(payload.technologies.as_deref(), Some("Rust, Tokio"));
        assert_eq!(payload.image_url, None);
    }

    #[test]
    fn doi_link_is_reduced_to_bare_doi() {
        let mut form = PublicationForm::blank(&defaults());
        form.doi = "https://doi.org/10.1000/xyz".into();
        assert_eq!(form.to_payload().doi.as_deref(), Some("10.1000/xyz"));
    }
}
