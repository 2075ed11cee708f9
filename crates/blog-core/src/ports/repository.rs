use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::RepoError;
use crate::pagination::PageQuery;

/// Generic repository trait for single-entity lookups and removal.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Insert a post; the store assigns `id`, `created_at` and `updated_at`.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update. `Ok(None)` when the post does not exist.
    async fn update(&self, id: i32, patch: PostPatch) -> Result<Option<Post>, RepoError>;

    /// Execute a page query, returning at most `query.fetch_limit()` rows
    /// in its order.
    ///
    /// Dropping the returned future must stop the scan and release any
    /// borrowed connection. A row that cannot be decoded fails the whole call
    /// with `RepoError::Decode`.
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Post>, RepoError>;

    /// Cheap round trip used by health checks.
    async fn ping(&self) -> Result<(), RepoError>;
}
