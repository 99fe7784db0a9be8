//! Contact form submission and the admin inbox.

use folio_core::entities::{ContactMessage, ContactPayload};
use folio_core::{Page, Pagination, Validate};
use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ClientError;

const CONTACT_PATH: &str = "/api/contact/";

/// Default inbox window used by the API.
pub const INBOX_PAGE: Pagination = Pagination::new(0, 50);

#[derive(Debug, Clone)]
pub struct ContactApi {
    api: ApiClient,
}

impl ContactApi {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submit a contact message.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without sending if a required
    /// field is blank or the email address is malformed.
    pub async fn send(&self, payload: &ContactPayload) -> Result<(), ClientError> {
        payload.validate()?;
        self.api
            .send_unit(Method::POST, CONTACT_PATH, Some(payload))
            .await?;
        tracing::info!("contact message sent");
        Ok(())
    }

    /// List received messages (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn list(
        &self,
        pagination: Option<Pagination>,
    ) -> Result<Page<ContactMessage>, ClientError> {
        let window = pagination.unwrap_or(INBOX_PAGE);
        let items: Vec<ContactMessage> = self
            .api
            .get_json(&format!("{CONTACT_PATH}{}", window.query()))
            .await?;
        Ok(Page::new(items, Some(window)))
    }
}
