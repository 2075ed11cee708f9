//! PostgreSQL repository implementations.

use async_trait::async_trait;
use futures::TryStreamExt;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbBackend, EntityTrait, QueryFilter, Statement, Value,
};

use blog_core::domain::{NewPost, Post, PostPatch};
use blog_core::error::RepoError;
use blog_core::pagination::{PageQuery, QueryArg};
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Created post");
        Ok(model.into())
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        // Single statement; a row deleted concurrently comes back as zero rows.
        // `updated_at` takes the database clock, same as the column default.
        let mut stmt = PostEntity::update_many()
            .col_expr(post::Column::UpdatedAt, Expr::current_timestamp().into())
            .filter(post::Column::Id.eq(id));
        if let Some(title) = patch.title {
            stmt = stmt.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(content) = patch.content {
            stmt = stmt.col_expr(post::Column::Content, Expr::value(content));
        }
        if let Some(author) = patch.author {
            stmt = stmt.col_expr(post::Column::Author, Expr::value(author));
        }

        let models = stmt
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        if models.is_empty() {
            tracing::debug!(post_id = id, "Update matched no post");
        }
        Ok(models.into_iter().next().map(Into::into))
    }

    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Post>, RepoError> {
        let (sql, args) = query.to_sql();
        tracing::debug!(%sql, args = args.len(), "Fetching post page");

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            args.into_iter().map(to_value),
        );

        // Rows are pulled one at a time; dropping this future drops the stream
        // and hands the connection back to the pool.
        let mut rows = PostEntity::find()
            .from_raw_sql(stmt)
            .stream(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut posts = Vec::with_capacity(query.fetch_limit() as usize);
        while let Some(model) = rows.try_next().await.map_err(map_db_err)? {
            posts.push(model.into());
        }

        Ok(posts)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.db.ping().await.map_err(map_db_err)
    }
}

fn to_value(arg: QueryArg) -> Value {
    match arg {
        QueryArg::Int(v) => v.into(),
        QueryArg::BigInt(v) => v.into(),
        QueryArg::Text(v) => v.into(),
        // Columns are `TIMESTAMP` (no zone) holding UTC.
        QueryArg::Timestamp(v) => v.naive_utc().into(),
    }
}
