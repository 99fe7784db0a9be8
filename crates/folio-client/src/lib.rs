//! # folio-client
//!
//! HTTP access to the portfolio API.
//!
//! [`ApiClient`] owns the cross-cutting request behaviour (base URL, JSON
//! content type, timeout, bearer token, 401 handling). Resource clients on
//! top of it only build requests:
//! - [`Resources`] for the blog, research and papers collections
//! - [`ContactApi`] for the contact form and inbox
//! - [`AuthApi`] for login and verify

pub mod auth;
pub mod client;
pub mod contact;
pub mod error;
mod http;
pub mod resources;

#[cfg(feature = "test-util")]
pub mod testing;

pub use auth::AuthApi;
pub use client::{ApiClient, with_cancel};
pub use contact::ContactApi;
pub use error::{ClientError, ErrorKind};
pub use resources::Resources;

use folio_core::entities::{BlogPost, Publication, ResearchProject};

impl ApiClient {
    #[must_use]
    pub fn blogs(&self) -> Resources<BlogPost> {
        Resources::new(self.clone())
    }

    #[must_use]
    pub fn research(&self) -> Resources<ResearchProject> {
        Resources::new(self.clone())
    }

    #[must_use]
    pub fn papers(&self) -> Resources<Publication> {
        Resources::new(self.clone())
    }

    #[must_use]
    pub fn contact(&self) -> ContactApi {
        ContactApi::new(self.clone())
    }

    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }
}
