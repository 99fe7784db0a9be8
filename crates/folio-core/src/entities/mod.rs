//! Entity structs for the portfolio resources.
//!
//! Each entity mirrors one REST collection of the portfolio API. All structs
//! derive `Serialize`, `Deserialize`, and `JsonSchema`; each resource has a
//! matching `*Payload` used for create and update.

mod blog;
mod contact;
mod publication;
mod research;

pub use blog::{BlogPost, BlogPostPayload};
pub use contact::{ContactMessage, ContactPayload};
pub use publication::{Publication, PublicationPayload};
pub use research::{ResearchProject, ResearchProjectPayload};

/// Split a comma-joined list field into trimmed, non-empty entries.
pub(crate) fn split_list(value: Option<&str>) -> Vec<&str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Treat blank strings from forms as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
