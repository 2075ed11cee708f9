#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use blog_core::domain::{NewPost, Post, PostPatch};
    use blog_core::error::RepoError;
    use blog_core::pagination::{self, Cursor, PageQuery, PostQuery};
    use blog_core::ports::{BaseRepository, PostRepository};
    use chrono::{DateTime, NaiveDateTime};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction, Value};

    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;

    fn naive(secs: i64) -> NaiveDateTime {
        DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
    }

    fn row(id: i32, created: i64) -> post::Model {
        post::Model {
            id,
            title: format!("Post {id}"),
            content: "Content".to_owned(),
            author: "alice".to_owned(),
            created_at: naive(created),
            updated_at: naive(created),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(7, 1_700_000_000)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Post 7");
        assert_eq!(post.id, 7);
        assert_eq!(post.created_at.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_first_page_query_text() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(5, 104), row(4, 103), row(3, 102)]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let query = PostQuery::default().with_limit(2);
        let page = pagination::paginate(&repo, &query).await.unwrap();

        let ids: Vec<i32> = page.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 4]);
        assert!(page.has_more);
        assert_eq!(
            pagination::cursor::decode(page.next_cursor.as_deref().unwrap()).unwrap(),
            Cursor::new(4, DateTime::from_timestamp(103, 0).unwrap())
        );

        assert_eq!(
            repo.db.into_transaction_log(),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT id, title, content, author, created_at, updated_at FROM posts \
                 ORDER BY created_at DESC, id DESC LIMIT $1",
                [Value::from(3i64)],
            )]
        );
    }

    #[tokio::test]
    async fn test_cursor_page_binds_tuple_and_filters() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(2, 101)]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let cursor = Cursor::new(3, DateTime::from_timestamp(102, 0).unwrap());
        let query = PostQuery::default().with_limit(2).by_author("alice");
        let page_query = PageQuery::build(&query, Some(&cursor));

        let rows = repo.fetch_page(&page_query).await.unwrap();
        assert_eq!(rows.len(), 1);

        assert_eq!(
            repo.db.into_transaction_log(),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT id, title, content, author, created_at, updated_at FROM posts \
                 WHERE (created_at, id) < ($1, $2) AND author = $3 \
                 ORDER BY created_at DESC, id DESC LIMIT $4",
                [
                    Value::from(naive(102)),
                    Value::from(3i32),
                    Value::from("alice"),
                    Value::from(3i64),
                ],
            )]
        );
    }

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, 1_700_000_000)]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let new_post =
            NewPost::new("Post 1".into(), "Content".into(), "alice".into()).unwrap();
        let created = repo.create(new_post).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.author, "alice");
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let result = BaseRepository::<Post, i32>::delete(&repo, 42).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_is_one_returning_statement() {
        let mut stored = row(3, 1_700_000_000);
        stored.title = "Renamed".to_owned();
        stored.updated_at = naive(1_700_000_500);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let patch = PostPatch::new(Some("Renamed".into()), None, None).unwrap();
        let updated = repo.update(3, patch).await.unwrap().unwrap();

        assert_eq!(updated.id, 3);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.updated_at.timestamp(), 1_700_000_500);

        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("UPDATE"), "{sql}");
        assert!(sql.contains("CURRENT_TIMESTAMP"), "{sql}");
        assert!(sql.contains("RETURNING"), "{sql}");
        assert!(!sql.contains("SELECT"), "{sql}");
    }

    #[tokio::test]
    async fn test_update_of_missing_post_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let patch = PostPatch::new(None, Some("New body".into()), None).unwrap();
        let result = repo.update(99, patch).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_malformed_row_is_a_decode_error() {
        let bad_row = BTreeMap::from([
            ("id", Value::from("not-an-int")),
            ("title", Value::from("Post")),
            ("content", Value::from("Content")),
            ("author", Value::from("alice")),
            ("created_at", Value::from(naive(100))),
            ("updated_at", Value::from(naive(100))),
        ]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![bad_row]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let result = repo
            .fetch_page(&PageQuery::build(&PostQuery::default(), None))
            .await;

        assert!(matches!(result, Err(RepoError::Decode(_))), "{result:?}");
    }
}
