use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum title length, in characters (`VARCHAR(255)`).
pub const TITLE_MAX_LEN: usize = 255;

/// Maximum author length, in characters (`VARCHAR(100)`).
pub const AUTHOR_MAX_LEN: usize = 100;

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post that has not been stored yet. Ids and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl NewPost {
    /// Validate and build a new post. All three fields are required.
    pub fn new(title: String, content: String, author: String) -> Result<Self, ValidationError> {
        require("title", &title)?;
        require("content", &content)?;
        require("author", &author)?;
        check_len("title", &title, TITLE_MAX_LEN)?;
        check_len("author", &author, AUTHOR_MAX_LEN)?;

        Ok(Self {
            title,
            content,
            author,
        })
    }

    /// Materialize into a stored post.
    pub fn into_post(self, id: i32, now: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            author: self.author,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl PostPatch {
    /// Build a patch; empty strings count as "not provided".
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        author: Option<String>,
    ) -> Result<Self, ValidationError> {
        let patch = Self {
            title: title.filter(|s| !s.is_empty()),
            content: content.filter(|s| !s.is_empty()),
            author: author.filter(|s| !s.is_empty()),
        };

        if let Some(title) = &patch.title {
            check_len("title", title, TITLE_MAX_LEN)?;
        }
        if let Some(author) = &patch.author {
            check_len("author", author, AUTHOR_MAX_LEN)?;
        }

        Ok(patch)
    }

    /// Apply the patch in place and bump `updated_at`.
    pub fn apply(self, post: &mut Post, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        post.updated_at = now;
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}
