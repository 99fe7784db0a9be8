use std::borrow::Cow;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::resource::{Resource, Validate, require};

/// Characters of `content` shown when a post has no excerpt.
pub const PREVIEW_CHARS: usize = 150;

/// A blog post. `content` is markdown.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    /// Comma-joined tag list.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(with = "crate::datetime::utc")]
    #[schemars(with = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "crate::datetime::utc_option")]
    #[schemars(with = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// The excerpt, or the first [`PREVIEW_CHARS`] characters of the content
    /// followed by `...` when there is none. The ellipsis is added even when
    /// the content is shorter.
    #[must_use]
    pub fn preview(&self) -> Cow<'_, str> {
        if let Some(excerpt) = super::non_blank(self.excerpt.as_deref()) {
            return Cow::Borrowed(excerpt);
        }
        let cut = self
            .content
            .char_indices()
            .nth(PREVIEW_CHARS)
            .map_or(self.content.len(), |(cut, _)| cut);
        Cow::Owned(format!("{}...", &self.content[..cut]))
    }

    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        super::split_list(self.tags.as_deref())
    }

    /// Posts without an explicit flag are published.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.published.unwrap_or(true)
    }
}

/// Create/update body for a blog post.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BlogPostPayload {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub published: bool,
    pub tags: Option<String>,
}

impl Validate for BlogPostPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require("title", &self.title)?;
        require("content", &self.content)
    }
}

impl Resource for BlogPost {
    type Payload = BlogPostPayload;

    const PATH: &'static str = "blogs";
    const LABEL: &'static str = "blog post";

    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str, excerpt: Option<&str>) -> BlogPost {
        BlogPost {
            id: 1,
            title: "Hello".into(),
            content: content.into(),
            excerpt: excerpt.map(Into::into),
            author: None,
            published: None,
            tags: Some("rust, genomics,, ".into()),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn preview_prefers_excerpt() {
        assert_eq!(post("body", Some("short")).preview(), "short");
    }

    #[test]
    fn preview_ignores_blank_excerpt() {
        assert_eq!(post("body", Some("  ")).preview(), "body...");
    }

    #[test]
    fn preview_marks_short_content_as_truncated() {
        assert_eq!(post("Short body", None).preview(), "Short body...");
        assert_eq!(post("", None).preview(), "...");
    }

    #[test]
    fn preview_truncates_long_content() {
        let content = "x".repeat(200);
        let preview = post(&content, None).preview().into_owned();
        assert_eq!(preview.len(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn tag_list_drops_empty_entries() {
        assert_eq!(post("b", None).tag_list(), vec!["rust", "genomics"]);
    }

    #[test]
    fn missing_published_defaults_to_true() {
        assert!(post("b", None).is_published());
    }

    #[test]
    fn payload_requires_title_and_content() {
        let mut payload = BlogPostPayload {
            title: "T".into(),
            content: String::new(),
            excerpt: None,
            author: None,
            published: true,
            tags: None,
        };
        let err = payload.validate().unwrap_err();
        assert!(err.to_string().contains("content"));
        payload.content = "body".into();
        assert!(payload.validate().is_ok());
    }
}
