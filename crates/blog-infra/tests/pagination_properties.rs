//! Draining every page must reproduce the filtered collection exactly once, in order.

use std::cmp::Ordering;

use blog_core::domain::Post;
use blog_core::pagination::{self, PostQuery, SortBy, SortDir};
use blog_infra::InMemoryPostRepository;
use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

const AUTHORS: [&str; 3] = ["alice", "bob", "carol"];
const TITLES: [&str; 5] = ["alpha", "Beta", "gamma", "alpha", "rust|go"];
const BODIES: [&str; 4] = ["", "learning Go", "RUST notes", "misc"];

fn base() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// Small value ranges so timestamps and titles collide often.
fn arb_posts() -> impl Strategy<Value = Vec<Post>> {
    prop::collection::vec((0..4i64, 0..4i64, 0..5usize, 0..4usize, 0..3usize), 0..25).prop_map(
        |rows| {
            rows.into_iter()
                .zip(1..)
                .map(|((created, updated, title, body, author), id)| Post {
                    id,
                    title: TITLES[title].to_owned(),
                    content: BODIES[body].to_owned(),
                    author: AUTHORS[author].to_owned(),
                    created_at: base() + Duration::seconds(created),
                    updated_at: base() + Duration::seconds(updated),
                })
                .collect()
        },
    )
}

fn arb_query() -> impl Strategy<Value = PostQuery> {
    let sort_by = prop_oneof![
        Just(SortBy::CreatedAt),
        Just(SortBy::UpdatedAt),
        Just(SortBy::Title),
        Just(SortBy::Id),
    ];
    let sort_dir = prop_oneof![Just(SortDir::Asc), Just(SortDir::Desc)];
    let author = prop::option::of(prop::sample::select(AUTHORS.to_vec()));
    let search = prop::option::of(prop::sample::select(vec!["go", "ALP", "a", "|"]));

    (1..8u32, sort_by, sort_dir, author, search).prop_map(
        |(limit, sort_by, sort_dir, author, search)| {
            let mut query = PostQuery::default()
                .with_limit(limit)
                .sorted(sort_by, sort_dir);
            query.author = author.map(str::to_owned);
            query.search = search.map(str::to_owned);
            query
        },
    )
}

/// Reference answer computed without the pagination machinery.
fn expected(posts: &[Post], query: &PostQuery) -> Vec<i32> {
    let mut matching: Vec<&Post> = posts
        .iter()
        .filter(|p| query.author.as_ref().is_none_or(|a| &p.author == a))
        .filter(|p| {
            query.search.as_ref().is_none_or(|term| {
                let term = term.to_lowercase();
                p.title.to_lowercase().contains(&term) || p.content.to_lowercase().contains(&term)
            })
        })
        .collect();

    matching.sort_by(|a, b| {
        let primary = match query.sort_by {
            SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            SortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortBy::Title => a.title.cmp(&b.title),
            SortBy::Id => Ordering::Equal,
        };
        let ord = primary.then(a.id.cmp(&b.id));
        match query.sort_dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });

    matching.into_iter().map(|p| p.id).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn drained_pages_cover_the_filtered_set_in_order(posts in arb_posts(), query in arb_query()) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let repo = InMemoryPostRepository::with_posts(posts.clone());

        let mut seen = Vec::new();
        let mut current = query.clone();
        for _ in 0..=posts.len() + 1 {
            let page = rt.block_on(pagination::paginate(&repo, &current)).unwrap();

            prop_assert!(page.posts.len() <= query.limit as usize);
            prop_assert_eq!(page.has_more, page.next_cursor.is_some());
            if page.has_more {
                prop_assert_eq!(page.posts.len(), query.limit as usize);
            }

            seen.extend(page.posts.iter().map(|p| p.id));
            match page.next_cursor {
                Some(next) => current = query.next_page(next),
                None => break,
            }
        }

        prop_assert_eq!(seen, expected(&posts, &query));
    }

    #[test]
    fn resuming_from_any_cursor_continues_after_that_row(posts in arb_posts(), query in arb_query()) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let repo = InMemoryPostRepository::with_posts(posts.clone());

        let first = rt.block_on(pagination::paginate(&repo, &query)).unwrap();
        if let Some(next) = first.next_cursor.clone() {
            let second = rt.block_on(pagination::paginate(&repo, &query.next_page(next))).unwrap();
            let all = expected(&posts, &query);

            let first_ids: Vec<i32> = first.posts.iter().map(|p| p.id).collect();
            let second_ids: Vec<i32> = second.posts.iter().map(|p| p.id).collect();
            let limit = query.limit as usize;

            prop_assert_eq!(&first_ids[..], &all[..limit]);
            let rest = &all[limit..];
            prop_assert_eq!(&second_ids[..], &rest[..rest.len().min(limit)]);
            prop_assert!(second_ids.iter().all(|id| !first_ids.contains(id)));
        }
    }
}
