//! HTTP handlers and route configuration.

mod health;
mod posts;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(extractor_errors::path())
        .app_data(extractor_errors::query())
        .app_data(extractor_errors::json())
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list_posts))
                        .route("", web::post().to(posts::create_post))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post)),
                ),
        );
}

/// Extractor failures rendered as problem details instead of actix's plain-text defaults.
mod extractor_errors {
    use super::*;

    pub fn path() -> web::PathConfig {
        web::PathConfig::default().error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected path parameter");
            AppError::BadRequest("id must be an integer".to_string()).into()
        })
    }

    pub fn query() -> web::QueryConfig {
        web::QueryConfig::default().error_handler(|err, _req| {
            AppError::BadRequest(format!("Invalid query string: {err}")).into()
        })
    }

    pub fn json() -> web::JsonConfig {
        web::JsonConfig::default().error_handler(|err, _req| {
            AppError::BadRequest(format!("Invalid JSON body: {err}")).into()
        })
    }
}
