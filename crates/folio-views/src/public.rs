//! Read-only screens over the public collections, plus the contact form.

use chrono::{DateTime, Utc};
use folio_client::{ApiClient, ContactApi};
use folio_core::entities::{BlogPost, ContactPayload, Publication, ResearchProject};
use folio_core::security::sanitize_input;
use folio_core::{Page, Pagination, Validate};
use serde::Serialize;

use crate::error::ViewError;
use crate::throttle::SubmitThrottle;

const CONTACT_THROTTLE_KEY: &str = "contact";

/// One row of the blog index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogSummary {
    pub id: i64,
    pub title: String,
    /// The excerpt, or the first 150 characters of the post followed by `...`.
    pub preview: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&BlogPost> for BlogSummary {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            preview: post.preview().into_owned(),
            author: post.author.clone(),
            tags: post.tag_list().into_iter().map(String::from).collect(),
            created_at: post.created_at,
        }
    }
}

/// # Errors
///
/// Returns the client error if the listing cannot be fetched.
pub async fn blog_index(
    client: &ApiClient,
    pagination: Pagination,
) -> Result<Page<BlogSummary>, ViewError> {
    let page = client.blogs().list(Some(pagination)).await?;
    let summaries = page.iter().map(BlogSummary::from).collect();
    Ok(Page::new(summaries, page.pagination))
}

/// # Errors
///
/// Returns [`folio_client::ClientError::NotFound`] for an unknown id.
pub async fn blog_detail(client: &ApiClient, id: i64) -> Result<BlogPost, ViewError> {
    Ok(client.blogs().get(id).await?)
}

/// Research projects in display order (ascending `order`).
///
/// # Errors
///
/// Returns the client error if the listing cannot be fetched.
pub async fn research_listing(client: &ApiClient) -> Result<Vec<ResearchProject>, ViewError> {
    let mut projects = client.research().list(None).await?.items;
    ResearchProject::sort_by_order(&mut projects);
    Ok(projects)
}

/// # Errors
///
/// Returns [`folio_client::ClientError::NotFound`] for an unknown id.
pub async fn research_detail(client: &ApiClient, id: i64) -> Result<ResearchProject, ViewError> {
    Ok(client.research().get(id).await?)
}

/// A publication with its resolved DOI link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationEntry {
    #[serde(flatten)]
    pub publication: Publication,
    pub doi_url: Option<String>,
}

/// Publications newest first, then by `order`.
///
/// # Errors
///
/// Returns the client error if the listing cannot be fetched.
pub async fn publication_listing(client: &ApiClient) -> Result<Vec<PublicationEntry>, ViewError> {
    let mut papers = client.papers().list(None).await?.items;
    Publication::sort_for_listing(&mut papers);
    Ok(papers
        .into_iter()
        .map(|publication| PublicationEntry {
            doi_url: publication.doi_url(),
            publication,
        })
        .collect())
}

/// The public contact form.
#[derive(Debug)]
pub struct ContactForm {
    api: ContactApi,
    throttle: SubmitThrottle,
}

impl ContactForm {
    #[must_use]
    pub fn new(client: &ApiClient) -> Self {
        Self::with_throttle(client, SubmitThrottle::default())
    }

    #[must_use]
    pub fn with_throttle(client: &ApiClient, throttle: SubmitThrottle) -> Self {
        Self {
            api: client.contact(),
            throttle,
        }
    }

    /// Validate, throttle, then send with free-text fields HTML-escaped.
    /// Invalid input does not count against the throttle.
    ///
    /// # Errors
    ///
    /// Returns a validation error, [`ViewError::Throttled`] when submitting
    /// again too soon, or the client error from sending.
    pub async fn submit(&self, payload: &ContactPayload) -> Result<(), ViewError> {
        payload.validate()?;
        self.throttle.check(CONTACT_THROTTLE_KEY)?;
        let escaped = ContactPayload {
            name: sanitize_input(payload.name.trim()),
            email: payload.email.trim().to_string(),
            subject: payload.subject.as_deref().map(sanitize_input),
            message: sanitize_input(&payload.message),
        };
        self.api.send(&escaped).await?;
        Ok(())
    }
}
