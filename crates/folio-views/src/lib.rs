//! # folio-views
//!
//! Screen logic for the portfolio client, independent of how it is drawn.
//!
//! - [`Router`]: current route; the only component that navigates
//! - [`AdminView`]: guarded CRUD screen (`Guarding -> Listing <-> Editing`)
//! - [`public`]: blog, research and publication listings and the contact form
//! - [`dashboard`]: admin landing stats

pub mod admin;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod guard;
pub mod public;
pub mod router;
pub mod throttle;

pub use admin::{AdminView, BlogAdmin, Confirm, PublicationAdmin, ResearchAdmin, ViewPhase};
pub use error::ViewError;
pub use form::{BlogForm, EditForm, FormDefaults, PublicationForm, ResearchForm};
pub use router::{Route, Router};
pub use throttle::SubmitThrottle;
