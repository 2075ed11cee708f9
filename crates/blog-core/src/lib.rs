//! # Blog Core
//!
//! The domain layer of the blog posts API.
//! This crate contains pure business logic with zero infrastructure dependencies,
//! including the keyset pagination engine used by `GET /api/v1/posts`.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;

pub use error::{CursorError, DomainError, RepoError, ValidationError};
pub use pagination::{PaginatedPosts, PostQuery};
