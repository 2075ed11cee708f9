//! Translates a validated [`PostQuery`] into a backend-agnostic page specification.
//!
//! A [`PageQuery`] is structured rather than textual: it renders to
//! parameterized PostgreSQL (`$1, $2, …`) via [`PageQuery::to_sql`] and can be
//! evaluated directly against in-memory posts via [`PageQuery::matches`] and
//! [`PageQuery::compare`]. Both paths read the same predicates and order terms.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::domain::Post;

use super::cursor::{Cursor, SortKey};
use super::query::{PostQuery, SortBy, SortDir};

/// Columns selected for every page, in row order.
pub const POST_COLUMNS: &str = "id, title, content, author, created_at, updated_at";

/// A positional parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryArg {
    Int(i32),
    BigInt(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn of(sort_by: SortBy) -> Self {
        match sort_by {
            SortBy::CreatedAt => Self::CreatedAt,
            SortBy::UpdatedAt => Self::UpdatedAt,
            SortBy::Title => Self::Title,
            SortBy::Id => Self::Id,
        }
    }

    fn compare(self, a: &Post, b: &Post) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Title => a.title.cmp(&b.title),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }

    /// Compare a post's value in this column with a bound argument.
    /// `None` when the argument has the wrong type for the column.
    fn compare_arg(self, post: &Post, arg: &QueryArg) -> Option<Ordering> {
        match (self, arg) {
            (Self::Id, QueryArg::Int(v)) => Some(post.id.cmp(v)),
            (Self::Id, QueryArg::BigInt(v)) => Some(i64::from(post.id).cmp(v)),
            (Self::Title, QueryArg::Text(v)) => Some(post.title.as_str().cmp(v)),
            (Self::CreatedAt, QueryArg::Timestamp(v)) => Some(post.created_at.cmp(v)),
            (Self::UpdatedAt, QueryArg::Timestamp(v)) => Some(post.updated_at.cmp(v)),
            _ => None,
        }
    }
}

/// One conjunct of the WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `(column, id) <op> ($n, $n+1)`: rows strictly after the cursor row.
    /// A tuple comparison, so rows sharing the cursor's column value are
    /// neither skipped nor repeated.
    KeysetAfter {
        column: Column,
        dir: SortDir,
        value: QueryArg,
        id: i32,
    },
    /// `id <op> $n`.
    IdAfter { dir: SortDir, id: i32 },
    /// `author = $n`.
    AuthorEq(String),
    /// `(title ILIKE $n OR content ILIKE $n+1)`.
    Search(String),
}

impl Predicate {
    fn render(&self, args: &mut Vec<QueryArg>) -> String {
        match self {
            Self::KeysetAfter {
                column,
                dir,
                value,
                id,
            } => {
                let value = bind(args, value.clone());
                let id = bind(args, QueryArg::Int(*id));
                format!(
                    "({}, id) {} ({value}, {id})",
                    column.as_str(),
                    dir.keyset_operator()
                )
            }
            Self::IdAfter { dir, id } => {
                let id = bind(args, QueryArg::Int(*id));
                format!("id {} {id}", dir.keyset_operator())
            }
            Self::AuthorEq(author) => {
                let author = bind(args, QueryArg::Text(author.clone()));
                format!("author = {author}")
            }
            Self::Search(term) => {
                let pattern = like_pattern(term);
                let title = bind(args, QueryArg::Text(pattern.clone()));
                let content = bind(args, QueryArg::Text(pattern));
                format!("(title ILIKE {title} OR content ILIKE {content})")
            }
        }
    }

    fn matches(&self, post: &Post) -> bool {
        match self {
            Self::KeysetAfter {
                column,
                dir,
                value,
                id,
            } => column
                .compare_arg(post, value)
                .is_some_and(|ord| ord.then(post.id.cmp(id)) == dir.after()),
            Self::IdAfter { dir, id } => post.id.cmp(id) == dir.after(),
            Self::AuthorEq(author) => post.author == *author,
            Self::Search(term) => {
                let term = term.to_lowercase();
                post.title.to_lowercase().contains(&term)
                    || post.content.to_lowercase().contains(&term)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub column: Column,
    pub dir: SortDir,
}

/// Everything a backend needs to fetch one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// ANDed together; empty means no WHERE clause.
    pub predicates: Vec<Predicate>,
    pub order: Vec<OrderTerm>,
    /// Page size requested by the client. Backends fetch one more row.
    pub limit: u32,
}

impl PageQuery {
    /// Build the page query for `query`, resuming after `cursor` when given.
    ///
    /// The cursor predicate and every order term share `query.sort_dir`, so the
    /// scan direction and the keyset comparison can never disagree.
    pub fn build(query: &PostQuery, cursor: Option<&Cursor>) -> Self {
        let dir = query.sort_dir;
        let mut predicates = Vec::new();

        if let Some(predicate) = cursor.and_then(|c| keyset_predicate(query.sort_by, dir, c)) {
            predicates.push(predicate);
        }
        if let Some(author) = &query.author {
            predicates.push(Predicate::AuthorEq(author.clone()));
        }
        if let Some(term) = &query.search {
            predicates.push(Predicate::Search(term.clone()));
        }

        let column = Column::of(query.sort_by);
        let mut order = vec![OrderTerm { column, dir }];
        if column != Column::Id {
            order.push(OrderTerm {
                column: Column::Id,
                dir,
            });
        }

        Self {
            predicates,
            order,
            limit: query.limit,
        }
    }

    /// Rows to request: one past the page size, to learn whether another page exists.
    pub fn fetch_limit(&self) -> u32 {
        self.limit + 1
    }

    /// `WHERE …` (or empty) plus its arguments, numbered from `$1`.
    pub fn where_fragment(&self) -> (String, Vec<QueryArg>) {
        let mut args = Vec::new();
        let clause = self.render_where(&mut args);
        (clause, args)
    }

    pub fn order_fragment(&self) -> String {
        let terms: Vec<String> = self
            .order
            .iter()
            .map(|term| format!("{} {}", term.column.as_str(), term.dir.as_sql()))
            .collect();
        format!("ORDER BY {}", terms.join(", "))
    }

    /// The complete SELECT statement and its arguments.
    pub fn to_sql(&self) -> (String, Vec<QueryArg>) {
        let mut args = Vec::new();
        let mut sql = format!("SELECT {POST_COLUMNS} FROM posts");

        let where_clause = self.render_where(&mut args);
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }

        sql.push(' ');
        sql.push_str(&self.order_fragment());

        let limit = bind(&mut args, QueryArg::BigInt(i64::from(self.fetch_limit())));
        sql.push_str(" LIMIT ");
        sql.push_str(&limit);

        (sql, args)
    }

    /// Whether `post` satisfies every predicate.
    pub fn matches(&self, post: &Post) -> bool {
        self.predicates.iter().all(|p| p.matches(post))
    }

    /// Order two posts the way `ORDER BY` would.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        self.order
            .iter()
            .map(|term| term.dir.orient(term.column.compare(a, b)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    fn render_where(&self, args: &mut Vec<QueryArg>) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self.predicates.iter().map(|p| p.render(args)).collect();
        format!("WHERE {}", conditions.join(" AND "))
    }
}

fn keyset_predicate(sort_by: SortBy, dir: SortDir, cursor: &Cursor) -> Option<Predicate> {
    let (column, value) = match (sort_by, &cursor.sort_key) {
        (SortBy::Id, _) => return Some(Predicate::IdAfter { dir, id: cursor.id }),
        (SortBy::CreatedAt, _) => (Column::CreatedAt, QueryArg::Timestamp(cursor.created_at)),
        (SortBy::UpdatedAt, Some(SortKey::UpdatedAt(ts))) => {
            (Column::UpdatedAt, QueryArg::Timestamp(*ts))
        }
        (SortBy::Title, Some(SortKey::Title(title))) => {
            (Column::Title, QueryArg::Text(title.clone()))
        }
        _ => return None,
    };

    Some(Predicate::KeysetAfter {
        column,
        dir,
        value,
        id: cursor.id,
    })
}

fn bind(args: &mut Vec<QueryArg>, arg: QueryArg) -> String {
    args.push(arg);
    format!("${}", args.len())
}

/// `%term%` with LIKE metacharacters escaped, so the term matches literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
