//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// A rejected input value. Only the first failure is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    /// A row came back but could not be mapped onto the domain type.
    #[error("Row decode failed: {0}")]
    Decode(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Reasons a cursor string was refused.
///
/// Never surfaced to clients: a bad cursor downgrades to a first-page fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor exceeds {max} bytes")]
    TooLarge { max: usize },

    #[error("cursor is not valid base64")]
    Base64,

    #[error("cursor payload is not valid UTF-8")]
    Utf8,

    #[error("cursor has {0} parts")]
    Parts(usize),

    #[error("cursor field `{0}` is malformed")]
    Field(&'static str),
}
