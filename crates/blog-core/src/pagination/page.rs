//! Shapes fetched rows into a page: trims the lookahead row and mints cursors.

use serde::Serialize;

use crate::domain::Post;

use super::cursor::Cursor;
use super::query::PostQuery;

/// One page of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginatedPosts {
    pub posts: Vec<Post>,
    /// Present iff more rows follow this page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Cursor of this page's first row, only when the request resumed from a cursor.
    /// Opaque; it cannot be replayed to walk backwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<String>,
    pub has_more: bool,
}

/// Assemble a page from up to `limit + 1` rows, already in sort order.
///
/// `resumed` is whether a usable cursor constrained the fetch.
pub fn assemble(mut rows: Vec<Post>, query: &PostQuery, resumed: bool) -> PaginatedPosts {
    let limit = query.limit as usize;
    let has_more = rows.len() > limit;
    rows.truncate(limit);

    let mint = |post: &Post| Cursor::for_post(post, query.sort_by).encode();

    // Minted from the last row that is still on the page, after trimming.
    let next_cursor = if has_more { rows.last().map(mint) } else { None };
    let prev_cursor = if resumed { rows.first().map(mint) } else { None };

    PaginatedPosts {
        has_more: next_cursor.is_some(),
        posts: rows,
        next_cursor,
        prev_cursor,
    }
}
