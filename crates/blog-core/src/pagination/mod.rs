//! Keyset (cursor-based) pagination over the posts collection.
//!
//! A request flows through four stages:
//!
//! 1. [`query`] validates raw parameters into a [`PostQuery`].
//! 2. [`cursor`] decodes the client's cursor, falling back to the first page.
//! 3. [`builder`] turns query + cursor into a [`PageQuery`] (predicates, order, `limit + 1`).
//! 4. [`page`] trims the lookahead row and mints the cursors of the response.
//!
//! Only stage 3's output ever reaches a backend, through [`PostRepository::fetch_page`].

pub mod builder;
pub mod cursor;
pub mod page;
pub mod query;

pub use builder::{Column, OrderTerm, PageQuery, Predicate, QueryArg};
pub use cursor::{Cursor, SortKey};
pub use page::PaginatedPosts;
pub use query::{PostQuery, RawPostQuery, SortBy, SortDir};

use crate::error::DomainError;
use crate::ports::PostRepository;

/// Fetch one page of posts.
///
/// Validation completes before any query is built. An unusable cursor is not an
/// error: the fetch starts from the first page instead.
pub async fn paginate<R>(repo: &R, query: &PostQuery) -> Result<PaginatedPosts, DomainError>
where
    R: PostRepository + ?Sized,
{
    query.validate()?;

    let cursor = query.decode_cursor();
    let page_query = PageQuery::build(query, cursor.as_ref());
    let rows = repo.fetch_page(&page_query).await?;

    tracing::debug!(
        rows = rows.len(),
        limit = query.limit,
        sort_by = %query.sort_by,
        sort_dir = %query.sort_dir,
        resumed = cursor.is_some(),
        "Fetched post page"
    );

    Ok(page::assemble(rows, query, cursor.is_some()))
}
