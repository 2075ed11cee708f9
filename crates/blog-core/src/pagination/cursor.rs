//! Opaque position markers exchanged with clients.
//!
//! Wire form: URL-safe, unpadded base64 over `"<id>|<unix-nanos>"`. Sorts other
//! than `created_at`/`id` append the sort column's value as a third segment
//! (`u:<nanos>` or `t:<title>`) so the next page can resume on that column.

use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};

use crate::domain::Post;
use crate::error::CursorError;

use super::query::SortBy;

/// Largest encoded cursor accepted by [`Cursor::decode`].
pub const MAX_CURSOR_LEN: usize = 2048;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// A decoded position in the sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    /// Value of the active sort column, when it is neither `created_at` nor `id`.
    pub sort_key: Option<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    UpdatedAt(DateTime<Utc>),
    Title(String),
}

impl Cursor {
    pub fn new(id: i32, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            sort_key: None,
        }
    }

    /// The cursor pointing at `post` under the given sort.
    pub fn for_post(post: &Post, sort_by: SortBy) -> Self {
        let sort_key = match sort_by {
            SortBy::CreatedAt | SortBy::Id => None,
            SortBy::UpdatedAt => Some(SortKey::UpdatedAt(post.updated_at)),
            SortBy::Title => Some(SortKey::Title(post.title.clone())),
        };

        Self {
            id: post.id,
            created_at: post.created_at,
            sort_key,
        }
    }

    /// Whether this cursor carries enough to resume a scan sorted by `sort_by`.
    pub fn fits(&self, sort_by: SortBy) -> bool {
        match sort_by {
            SortBy::CreatedAt | SortBy::Id => true,
            SortBy::UpdatedAt => matches!(self.sort_key, Some(SortKey::UpdatedAt(_))),
            SortBy::Title => matches!(self.sort_key, Some(SortKey::Title(_))),
        }
    }

    pub fn encode(&self) -> String {
        let mut raw = format!("{}|{}", self.id, to_nanos(self.created_at));
        match &self.sort_key {
            None => {}
            Some(SortKey::UpdatedAt(ts)) => {
                let _ = write!(raw, "|u:{}", to_nanos(*ts));
            }
            Some(SortKey::Title(title)) => {
                let _ = write!(raw, "|t:{title}");
            }
        }
        URL_SAFE_NO_PAD.encode(raw)
    }

    pub fn decode(encoded: &str) -> Result<Self, CursorError> {
        if encoded.len() > MAX_CURSOR_LEN {
            return Err(CursorError::TooLarge {
                max: MAX_CURSOR_LEN,
            });
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| CursorError::Base64)?;
        let raw = String::from_utf8(bytes).map_err(|_| CursorError::Utf8)?;

        // A title segment may itself contain '|', so split at most twice.
        let mut parts = raw.splitn(3, '|');
        let id_part = parts.next().unwrap_or_default();
        let nanos_part = parts.next().ok_or(CursorError::Parts(1))?;
        let sort_part = parts.next();

        let id = id_part
            .parse::<i32>()
            .ok()
            .filter(|id| *id >= 0)
            .ok_or(CursorError::Field("id"))?;
        let created_at = parse_nanos(nanos_part).ok_or(CursorError::Field("created_at"))?;

        let sort_key = match sort_part {
            None => None,
            Some(part) => Some(parse_sort_key(part).ok_or(CursorError::Field("sort_key"))?),
        };

        Ok(Self {
            id,
            created_at,
            sort_key,
        })
    }
}

/// Encode the plain `(id, created_at)` cursor.
pub fn encode(id: i32, created_at: DateTime<Utc>) -> String {
    Cursor::new(id, created_at).encode()
}

/// Decode any cursor produced by this module.
pub fn decode(encoded: &str) -> Result<Cursor, CursorError> {
    Cursor::decode(encoded)
}

fn parse_sort_key(part: &str) -> Option<SortKey> {
    if let Some(nanos) = part.strip_prefix("u:") {
        return parse_nanos(nanos).map(SortKey::UpdatedAt);
    }
    part.strip_prefix("t:")
        .map(|title| SortKey::Title(title.to_string()))
}

fn to_nanos(ts: DateTime<Utc>) -> i128 {
    i128::from(ts.timestamp()) * NANOS_PER_SEC + i128::from(ts.timestamp_subsec_nanos())
}

fn parse_nanos(s: &str) -> Option<DateTime<Utc>> {
    let nanos: i128 = s.parse().ok()?;
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SEC)).ok()?;
    let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SEC)).ok()?;
    DateTime::from_timestamp(secs, subsec)
}
