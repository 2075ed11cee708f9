//! Request-side query model and its validation.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{AUTHOR_MAX_LEN, check_len};
use crate::error::ValidationError;

use super::cursor::Cursor;

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;
pub const SEARCH_MAX_LEN: usize = 255;

/// Sort key for a post listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    /// Only reachable through the typed API; not accepted as a query parameter.
    Id,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
            Self::Id => "id",
        }
    }

    /// Parse the `sort_by` query parameter.
    pub fn from_param(value: &str) -> Result<Self, ValidationError> {
        match value {
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            _ => Err(ValidationError::new(
                "sort_by",
                "sort_by must be one of: created_at, updated_at, title",
            )),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Comparison operator selecting rows strictly after a position in this direction.
    pub fn keyset_operator(self) -> &'static str {
        match self {
            Self::Asc => ">",
            Self::Desc => "<",
        }
    }

    /// The ordering a row must have relative to the cursor to come after it.
    pub fn after(self) -> Ordering {
        match self {
            Self::Asc => Ordering::Greater,
            Self::Desc => Ordering::Less,
        }
    }

    /// Orient an ascending comparison for this direction.
    pub fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Parse the `sort_dir` query parameter.
    pub fn from_param(value: &str) -> Result<Self, ValidationError> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ValidationError::new(
                "sort_dir",
                "sort_dir must be one of: asc, desc",
            )),
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated listing parameters as they arrive in the query string.
///
/// Empty strings are treated the same as absent parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPostQuery {
    pub cursor: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub author: Option<String>,
    pub search: Option<String>,
}

impl RawPostQuery {
    /// Apply defaults and reject malformed values. The cursor is not decoded here.
    pub fn normalize_and_validate(self) -> Result<PostQuery, ValidationError> {
        let limit = match present(self.limit) {
            None => DEFAULT_LIMIT,
            Some(raw) => parse_limit(&raw)?,
        };
        let sort_by = match present(self.sort_by) {
            None => SortBy::default(),
            Some(raw) => SortBy::from_param(&raw)?,
        };
        let sort_dir = match present(self.sort_dir) {
            None => SortDir::default(),
            Some(raw) => SortDir::from_param(&raw)?,
        };

        let query = PostQuery {
            cursor: present(self.cursor),
            limit,
            sort_by,
            sort_dir,
            author: present(self.author),
            search: present(self.search),
        };
        query.validate()?;
        Ok(query)
    }
}

/// A validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub cursor: Option<String>,
    pub limit: u32,
    pub sort_by: SortBy,
    pub sort_dir: SortDir,
    pub author: Option<String>,
    pub search: Option<String>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            cursor: None,
            limit: DEFAULT_LIMIT,
            sort_by: SortBy::default(),
            sort_dir: SortDir::default(),
            author: None,
            search: None,
        }
    }
}

impl PostQuery {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn sorted(mut self, sort_by: SortBy, sort_dir: SortDir) -> Self {
        self.sort_by = sort_by;
        self.sort_dir = sort_dir;
        self
    }

    pub fn by_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn searching(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Re-check the invariants of a typed query; callers may have built it by hand.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(limit_error());
        }
        if let Some(author) = &self.author {
            check_len("author", author, AUTHOR_MAX_LEN)?;
        }
        if let Some(search) = &self.search {
            check_len("search", search, SEARCH_MAX_LEN)?;
        }
        Ok(())
    }

    /// Decode the cursor, treating anything unusable as "start from the first page".
    pub fn decode_cursor(&self) -> Option<Cursor> {
        let raw = self.cursor.as_deref().filter(|c| !c.is_empty())?;
        match Cursor::decode(raw) {
            Ok(cursor) if cursor.fits(self.sort_by) => Some(cursor),
            Ok(_) => {
                tracing::debug!(
                    sort_by = %self.sort_by,
                    "Cursor was minted for another sort; starting from the first page"
                );
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid cursor");
                None
            }
        }
    }

    /// Same filters and sort, resuming from `cursor`.
    pub fn next_page(&self, cursor: impl Into<String>) -> Self {
        self.clone().with_cursor(cursor)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_limit(raw: &str) -> Result<u32, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| (1..=i64::from(MAX_LIMIT)).contains(n))
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(limit_error)
}

fn limit_error() -> ValidationError {
    ValidationError::new(
        "limit",
        format!("limit must be an integer between 1 and {MAX_LIMIT}"),
    )
}
