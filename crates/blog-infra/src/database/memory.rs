//! In-memory post repository - used when no database is configured, and by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, PostPatch};
use blog_core::error::RepoError;
use blog_core::pagination::PageQuery;
use blog_core::ports::{BaseRepository, PostRepository};

struct Store {
    posts: BTreeMap<i32, Post>,
    next_id: i32,
}

/// In-memory posts keyed by id, behind an async RwLock.
///
/// Pages are resolved by evaluating the same [`PageQuery`] the PostgreSQL
/// adapter renders to SQL, so both backends page identically.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    /// Seed the repository with existing posts; their ids and timestamps are kept.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let posts: BTreeMap<i32, Post> = posts.into_iter().map(|p| (p.id, p)).collect();
        let next_id = posts.keys().next_back().map_or(1, |id| id + 1);

        Self {
            store: RwLock::new(Store { posts, next_id }),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.posts.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| RepoError::Constraint("post id sequence exhausted".to_string()))?;

        let post = post.into_post(id, Utc::now());
        store.posts.insert(id, post.clone());

        tracing::debug!(post_id = id, "Created post in memory");
        Ok(post)
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(post) = store.posts.get_mut(&id) else {
            return Ok(None);
        };

        patch.apply(post, Utc::now());
        Ok(Some(post.clone()))
    }

    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut rows: Vec<Post> = store
            .posts
            .values()
            .filter(|post| query.matches(post))
            .cloned()
            .collect();
        drop(store);

        rows.sort_by(|a, b| query.compare(a, b));
        rows.truncate(query.fetch_limit() as usize);
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
