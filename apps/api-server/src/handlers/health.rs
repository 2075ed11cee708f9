//! Health check endpoint.

use actix_web::{HttpResponse, web};
use blog_shared::dto::HealthResponse;

use crate::state::AppState;

/// Health check endpoint - reports whether the post store answers.
///
/// GET /api/v1/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (mut response, status, database) = match state.posts.ping().await {
        Ok(()) => (HttpResponse::Ok(), "healthy", "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (HttpResponse::ServiceUnavailable(), "unhealthy", "disconnected")
        }
    };

    response.json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        timestamp: chrono::Utc::now(),
    })
}
