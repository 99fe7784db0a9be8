//! # folio-core
//!
//! Core types shared across all Folio crates:
//! - Entity structs for the portfolio resources (blog posts, research projects,
//!   publications, contact messages)
//! - Create/update payloads with client-side validation
//! - The [`Resource`] trait that binds an entity to its REST path and payload
//! - Pagination and identity types
//! - Cross-cutting error types
//! - Input security helpers and the markdown toolbar helper

pub mod datetime;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod markdown;
pub mod pagination;
pub mod resource;
pub mod security;

pub use errors::CoreError;
pub use pagination::{Page, Pagination};
pub use resource::{Resource, Validate};
