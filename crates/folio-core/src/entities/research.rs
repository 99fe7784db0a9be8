use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectStatus;
use crate::errors::CoreError;
use crate::resource::{Resource, Validate, optional_url, require};

/// A research project. `description` is markdown.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchProject {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    /// Comma-joined technology list.
    #[serde(default)]
    pub technologies: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Manual sort key, ascending.
    #[serde(default)]
    pub order: Option<i32>,
}

impl ResearchProject {
    #[must_use]
    pub fn status(&self) -> ProjectStatus {
        self.status.unwrap_or_default()
    }

    #[must_use]
    pub fn sort_key(&self) -> i32 {
        self.order.unwrap_or(0)
    }

    #[must_use]
    pub fn technology_list(&self) -> Vec<&str> {
        super::split_list(self.technologies.as_deref())
    }

    /// `"start - end"`, `"start"`, or `None` when no start date is set.
    #[must_use]
    pub fn period(&self) -> Option<String> {
        let start = super::non_blank(self.start_date.as_deref())?;
        Some(match super::non_blank(self.end_date.as_deref()) {
            Some(end) => format!("{start} - {end}"),
            None => start.to_string(),
        })
    }

    /// Stable ascending sort by `order`.
    pub fn sort_by_order(items: &mut [Self]) {
        items.sort_by_key(Self::sort_key);
    }
}

/// Create/update body for a research project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchProjectPayload {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub technologies: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub order: i32,
}

impl Validate for ResearchProjectPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        optional_url("image_url", self.image_url.as_deref())?;
        optional_url("project_url", self.project_url.as_deref())
    }
}

impl Resource for ResearchProject {
    type Payload = ResearchProjectPayload;

    const PATH: &'static str = "research";
    const LABEL: &'static str = "research project";

    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}
