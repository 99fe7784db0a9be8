use std::cmp::Reverse;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::resource::{Resource, Validate, optional_url, require};

pub const DOI_RESOLVER: &str = "https://doi.org/";

/// An academic publication. `doi` is stored without the resolver prefix.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Publication {
    pub id: i64,
    pub title: String,
    pub authors: String,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
}

impl Publication {
    /// Resolvable link for the DOI, if one is set.
    #[must_use]
    pub fn doi_url(&self) -> Option<String> {
        super::non_blank(self.doi.as_deref()).map(|doi| format!("{DOI_RESOLVER}{}", doi.trim()))
    }

    /// Newest year first, then ascending `order`. Publications without a year
    /// sort last.
    pub fn sort_for_listing(items: &mut [Self]) {
        items.sort_by_key(|p| (Reverse(p.year.unwrap_or(i32::MIN)), p.order.unwrap_or(0)));
    }
}

/// Create/update body for a publication.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PublicationPayload {
    pub title: String,
    pub authors: String,
    pub journal: Option<String>,
    pub year: Option<i32>,
    pub doi: Option<String>,
    pub pdf_url: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub citation: Option<String>,
    pub order: i32,
}

impl PublicationPayload {
    /// Accept a pasted resolver link and keep only the bare DOI.
    #[must_use]
    pub fn normalize_doi(doi: &str) -> String {
        let trimmed = doi.trim();
        trimmed
            .strip_prefix(DOI_RESOLVER)
            .or_else(|| trimmed.strip_prefix("http://doi.org/"))
            .unwrap_or(trimmed)
            .to_string()
    }
}

impl Validate for PublicationPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require("title", &self.title)?;
        require("authors", &self.authors)?;
        if let Some(year) = self.year
            && !(1000..=9999).contains(&year)
        {
            return Err(CoreError::validation("year", format!("{year} is not a four-digit year")));
        }
        optional_url("pdf_url", self.pdf_url.as_deref())
    }
}

impl Resource for Publication {
    type Payload = PublicationPayload;

    const PATH: &'static str = "papers";
    const LABEL: &'static str = "publication";

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
    use pretty_assertions::assert_eq;

    fn paper(id: i64, year: Option<i32>, order: Option<i32>) -> Publication {
        Publication {
            id,
            title: format!("Paper {id}"),
            authors: "A. Author".into(),
            journal: None,
            year,
            doi: None,
            pdf_url: None,
            abstract_text: None,
            citation: None,
            order,
        }
    }

    #[test]
    fn doi_url_prefixes_resolver() {
        let mut p = paper(1, None, None);
        assert!(p.doi_url().is_none());
        p.doi = Some("10.1000/xyz123".into());
        assert_eq!(p.doi_url().as_deref(), Some("https://doi.org/10.1000/xyz123"));
    }

    #[test]
    fn normalize_doi_strips_resolver() {
        assert_eq!(
            PublicationPayload::normalize_doi(" https://doi.org/10.1/abc "),
            "10.1/abc"
        );
        assert_eq!(PublicationPayload::normalize_doi("10.1/abc"), "10.1/abc");
    }

    #[test]
    fn listing_sort_is_year_desc_then_order() {
        let mut items = vec![
            paper(1, Some(2021), Some(1)),
            paper(2, Some(2023), Some(2)),
            paper(3, None, Some(0)),
            paper(4, Some(2023), Some(1)),
        ];
        Publication::sort_for_listing(&mut items);
        let ids: Vec<i64> = items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
    }

    #[test]
    fn abstract_uses_api_field_name() {
        let p: Publication = serde_json::from_str(
            r#"{"id":1,"title":"t","authors":"a","abstract":"summary"}"#,
        )
        .unwrap();
        assert_eq!(p.abstract_text.as_deref(), Some("summary"));
    }

    #[test]
    fn payload_rejects_implausible_year() {
        let payload = PublicationPayload {
            title: "t".into(),
            authors: "a".into(),
            journal: None,
            year: Some(23),
            doi: None,
            pdf_url: None,
            abstract_text: None,
            citation: None,
            order: 0,
        };
        assert!(payload.validate().is_err());
    }
}
