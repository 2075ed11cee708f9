//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{NewPost, Post, PostPatch};
use blog_core::error::{DomainError, RepoError};
use blog_core::pagination::{self, PaginatedPosts, RawPostQuery};
use blog_shared::dto::{
    CreatePostRequest, ListPostsParams, PaginatedPostsResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    params: web::Query<ListPostsParams>,
) -> AppResult<HttpResponse> {
    let query = raw_query(params.into_inner()).normalize_and_validate()?;

    let page = tokio::time::timeout(
        state.request_timeout,
        pagination::paginate(state.posts.as_ref(), &query),
    )
    .await
    .map_err(|_| {
        tracing::warn!(
            timeout_ms = state.request_timeout.as_millis() as u64,
            "Post listing timed out"
        );
        AppError::ServiceUnavailable("Listing posts timed out".to_string())
    })??;

    Ok(HttpResponse::Ok().json(page_response(page)))
}

/// POST /api/v1/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_post = NewPost::new(req.title, req.content, req.author)?;

    let post = state.posts.create(new_post).await?;
    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// PUT /api/v1/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let patch = PostPatch::new(req.title, req.content, req.author)?;

    let post = state
        .posts
        .update(id, patch)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.delete(id).await {
        Ok(()) => {
            tracing::info!(post_id = id, "Post deleted");
            Ok(HttpResponse::NoContent().finish())
        }
        Err(RepoError::NotFound) => Err(post_not_found(id)),
        Err(e) => Err(e.into()),
    }
}

fn post_not_found(id: i32) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
    .into()
}

fn raw_query(params: ListPostsParams) -> RawPostQuery {
    RawPostQuery {
        cursor: params.cursor,
        limit: params.limit,
        sort_by: params.sort_by,
        sort_dir: params.sort_dir,
        author: params.author,
        search: params.search,
    }
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author: post.author,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn page_response(page: PaginatedPosts) -> PaginatedPostsResponse {
    PaginatedPostsResponse {
        posts: page.posts.into_iter().map(post_response).collect(),
        next_cursor: page.next_cursor,
        prev_cursor: page.prev_cursor,
        has_more: page.has_more,
    }
}
