//! Generic CRUD client for one content collection.

use std::marker::PhantomData;

use folio_core::{Page, Pagination, Resource, Validate};
use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ClientError;

/// CRUD calls for the collection at `/api/{R::PATH}/`.
pub struct Resources<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Resources<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Resources<R> {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    fn collection() -> String {
        format!("/api/{}/", R::PATH)
    }

    fn item(id: i64) -> String {
        format!("/api/{}/{id}", R::PATH)
    }

    /// List the collection, optionally one `skip`/`limit` window of it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn list(&self, pagination: Option<Pagination>) -> Result<Page<R>, ClientError> {
        let path = match pagination {
            Some(p) => format!("{}{}", Self::collection(), p.query()),
            None => Self::collection(),
        };
        let items: Vec<R> = self.api.get_json(&path).await?;
        tracing::debug!(resource = R::PATH, count = items.len(), "listed");
        Ok(Page::new(items, pagination))
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for a 404, otherwise as [`Self::list`].
    pub async fn get(&self, id: i64) -> Result<R, ClientError> {
        self.api
            .get_json(&Self::item(id))
            .await
            .map_err(|e| not_found::<R>(e, id))
    }

    /// Validate `payload` and create a new item.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without sending anything if the
    /// payload is incomplete.
    pub async fn create(&self, payload: &R::Payload) -> Result<R, ClientError> {
        payload.validate()?;
        let created: R = self
            .api
            .send_json(Method::POST, &Self::collection(), payload)
            .await?;
        tracing::info!(resource = R::PATH, id = created.id(), "created");
        Ok(created)
    }

    /// Validate `payload` and replace item `id`.
    ///
    /// # Errors
    ///
    /// As [`Self::create`], plus [`ClientError::NotFound`] for a 404.
    pub async fn update(&self, id: i64, payload: &R::Payload) -> Result<R, ClientError> {
        payload.validate()?;
        let updated = self
            .api
            .send_json(Method::PUT, &Self::item(id), payload)
            .await
            .map_err(|e| not_found::<R>(e, id))?;
        tracing::info!(resource = R::PATH, id, "updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for a 404, otherwise as [`Self::list`].
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api
            .send_unit::<()>(Method::DELETE, &Self::item(id), None)
            .await
            .map_err(|e| not_found::<R>(e, id))?;
        tracing::info!(resource = R::PATH, id, "deleted");
        Ok(())
    }
}

fn not_found<R: Resource>(error: ClientError, id: i64) -> ClientError {
    match error {
        ClientError::Api { status: 404, .. } => ClientError::NotFound {
            entity: R::LABEL,
            id,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::entities::{BlogPost, Publication, ResearchProject};

    #[test]
    fn paths_follow_collection() {
        assert_eq!(Resources::<BlogPost>::collection(), "/api/blogs/");
        assert_eq!(Resources::<ResearchProject>::item(3), "/api/research/3");
        assert_eq!(Resources::<Publication>::item(12), "/api/papers/12");
    }

    #[test]
    fn maps_404_to_not_found() {
        let err = not_found::<BlogPost>(
            ClientError::Api {
                status: 404,
                message: "Blog post not found".into(),
            },
            5,
        );
        assert_eq!(err.to_string(), "blog post 5 not found");
    }
}
