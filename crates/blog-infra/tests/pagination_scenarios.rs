//! End-to-end paging over the in-memory repository.

use blog_core::domain::Post;
use blog_core::pagination::{
    self, cursor, Cursor, PaginatedPosts, PostQuery, RawPostQuery, SortBy, SortDir,
};
use blog_core::DomainError;
use blog_infra::InMemoryPostRepository;
use chrono::{DateTime, Duration, Utc};

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn post(id: i32, created_at: DateTime<Utc>, author: &str) -> Post {
    Post {
        id,
        title: format!("Post {id}"),
        content: format!("Body of post {id}"),
        author: author.to_owned(),
        created_at,
        updated_at: created_at,
    }
}

fn ids(page: &PaginatedPosts) -> Vec<i32> {
    page.posts.iter().map(|p| p.id).collect()
}

async fn walk(repo: &InMemoryPostRepository, query: &PostQuery) -> Vec<PaginatedPosts> {
    let mut pages = Vec::new();
    let mut current = query.clone();
    loop {
        let page = pagination::paginate(repo, &current).await.unwrap();
        let next = page.next_cursor.clone();
        pages.push(page);
        match next {
            Some(next) => current = query.next_page(next),
            None => return pages,
        }
        assert!(pages.len() < 1_000, "pagination did not terminate");
    }
}

#[tokio::test]
async fn newest_first_in_pages_of_two() {
    let repo = InMemoryPostRepository::with_posts(
        (1..=5).map(|id| post(id, t0() + Duration::seconds(i64::from(id) - 1), "alice")),
    );
    let query = PostQuery::default().with_limit(2);

    let first = pagination::paginate(&repo, &query).await.unwrap();
    assert_eq!(ids(&first), vec![5, 4]);
    assert!(first.has_more);
    assert_eq!(first.prev_cursor, None);
    let next = first.next_cursor.clone().unwrap();
    assert_eq!(next, cursor::encode(4, t0() + Duration::seconds(3)));

    let second = pagination::paginate(&repo, &query.next_page(next))
        .await
        .unwrap();
    assert_eq!(ids(&second), vec![3, 2]);
    assert!(second.has_more);
    assert_eq!(
        second.prev_cursor.as_deref().map(Cursor::decode).unwrap().unwrap(),
        Cursor::new(3, t0() + Duration::seconds(2))
    );

    let third = pagination::paginate(&repo, &query.next_page(second.next_cursor.unwrap()))
        .await
        .unwrap();
    assert_eq!(ids(&third), vec![1]);
    assert!(!third.has_more);
    assert_eq!(third.next_cursor, None);
}

#[tokio::test]
async fn identical_timestamps_are_split_by_id() {
    let repo = InMemoryPostRepository::with_posts([
        post(10, t0(), "alice"),
        post(11, t0(), "alice"),
        post(12, t0() + Duration::seconds(1), "alice"),
    ]);

    let pages = walk(&repo, &PostQuery::default().with_limit(1)).await;

    let seen: Vec<Vec<i32>> = pages.iter().map(ids).collect();
    assert_eq!(seen, vec![vec![12], vec![11], vec![10]]);
    assert!(!pages.last().unwrap().has_more);
}

#[tokio::test]
async fn rejected_limits_are_validation_errors() {
    for limit in ["0", "101", "-3", "ten"] {
        let err = RawPostQuery {
            limit: Some(limit.to_owned()),
            ..Default::default()
        }
        .normalize_and_validate()
        .unwrap_err();
        assert_eq!(err.field, "limit", "limit={limit}");
    }

    let repo = InMemoryPostRepository::new();
    let err = pagination::paginate(&repo, &PostQuery::default().with_limit(101))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn author_filter_returns_only_that_author() {
    let authors = ["alice", "bob", "alice", "carol", "bob", "alice", "bob"];
    let repo = InMemoryPostRepository::with_posts(
        authors
            .iter()
            .zip(1..)
            .map(|(author, id)| post(id, t0() + Duration::seconds(i64::from(id)), author)),
    );

    let page = pagination::paginate(&repo, &PostQuery::default().with_limit(10).by_author("alice"))
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![6, 3, 1]);
    assert!(page.posts.iter().all(|p| p.author == "alice"));
    assert!(!page.has_more);
}

#[tokio::test]
async fn search_is_case_insensitive_over_title_and_content() {
    let mut in_title = post(1, t0(), "alice");
    in_title.title = "Intro to Golang".into();
    let mut in_content = post(2, t0() + Duration::seconds(1), "bob");
    in_content.content = "Notes on GOLANG generics".into();
    let unrelated = post(3, t0() + Duration::seconds(2), "carol");

    let repo = InMemoryPostRepository::with_posts([in_title, in_content, unrelated]);
    let page = pagination::paginate(&repo, &PostQuery::default().searching("GoLaNg"))
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![2, 1]);
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let mut percent = post(1, t0(), "alice");
    percent.title = "100% coverage".into();
    let plain = post(2, t0() + Duration::seconds(1), "alice");

    let repo = InMemoryPostRepository::with_posts([percent, plain]);
    let page = pagination::paginate(&repo, &PostQuery::default().searching("%"))
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![1]);
}

#[tokio::test]
async fn garbage_cursor_is_the_first_page() {
    let repo = InMemoryPostRepository::with_posts(
        (1..=4).map(|id| post(id, t0() + Duration::seconds(i64::from(id)), "alice")),
    );
    let query = PostQuery::default().with_limit(2);

    let fresh = pagination::paginate(&repo, &query).await.unwrap();
    let tolerant = pagination::paginate(&repo, &query.clone().with_cursor("!!!not-base64!!!"))
        .await
        .unwrap();

    assert_eq!(tolerant, fresh);
}

#[tokio::test]
async fn cursor_from_another_sort_restarts() {
    let repo = InMemoryPostRepository::with_posts(
        (1..=4).map(|id| post(id, t0() + Duration::seconds(i64::from(id)), "alice")),
    );
    let by_title = PostQuery::default()
        .with_limit(2)
        .sorted(SortBy::Title, SortDir::Asc);

    let fresh = pagination::paginate(&repo, &by_title).await.unwrap();
    let created_cursor = cursor::encode(2, t0() + Duration::seconds(2));
    let restarted = pagination::paginate(&repo, &by_title.next_page(created_cursor))
        .await
        .unwrap();

    assert_eq!(restarted, fresh);
}

#[tokio::test]
async fn oldest_first_walks_forward() {
    let repo = InMemoryPostRepository::with_posts(
        (1..=5).map(|id| post(id, t0() + Duration::seconds(i64::from(id)), "alice")),
    );
    let query = PostQuery::default()
        .with_limit(2)
        .sorted(SortBy::CreatedAt, SortDir::Asc);

    let seen: Vec<Vec<i32>> = walk(&repo, &query).await.iter().map(ids).collect();
    assert_eq!(seen, vec![vec![1, 2], vec![3, 4], vec![5]]);
}

#[tokio::test]
async fn updated_at_sort_pages_through_shared_values() {
    let mut posts: Vec<Post> = (1..=6).map(|id| post(id, t0(), "alice")).collect();
    for (p, offset) in posts.iter_mut().zip([3, 1, 3, 2, 1, 3]) {
        p.updated_at = t0() + Duration::seconds(offset);
    }
    let repo = InMemoryPostRepository::with_posts(posts);

    let query = PostQuery::default()
        .with_limit(2)
        .sorted(SortBy::UpdatedAt, SortDir::Desc);
    let seen: Vec<i32> = walk(&repo, &query).await.iter().flat_map(ids).collect();

    assert_eq!(seen, vec![6, 3, 1, 4, 5, 2]);
}

#[tokio::test]
async fn title_sort_pages_through_duplicates_and_separators() {
    let titles = ["beta", "alpha|one", "beta", "Gamma", "alpha|one"];
    let repo = InMemoryPostRepository::with_posts(titles.iter().zip(1..).map(|(title, id)| {
        let mut p = post(id, t0(), "alice");
        p.title = (*title).to_owned();
        p
    }));

    let query = PostQuery::default()
        .with_limit(2)
        .sorted(SortBy::Title, SortDir::Asc);
    let seen: Vec<i32> = walk(&repo, &query).await.iter().flat_map(ids).collect();

    // Byte order: uppercase sorts before lowercase.
    assert_eq!(seen, vec![4, 2, 5, 1, 3]);
}

#[tokio::test]
async fn empty_collection_has_no_cursors() {
    let repo = InMemoryPostRepository::new();
    let page = pagination::paginate(&repo, &PostQuery::default()).await.unwrap();

    assert!(page.posts.is_empty());
    assert!(!page.has_more);
    assert_eq!(page.next_cursor, None);
    assert_eq!(page.prev_cursor, None);
}
