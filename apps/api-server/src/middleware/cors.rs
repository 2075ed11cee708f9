//! Cross-origin resource sharing.

use actix_cors::Cors;
use actix_web::http::header;

use crate::observability::REQUEST_ID_HEADER;

/// How long browsers may cache a preflight answer, in seconds.
const PREFLIGHT_MAX_AGE: usize = 3600;

/// CORS policy for the API: any origin, only the methods the routes serve.
///
/// Preflights for other methods are answered with 400 and no allow headers.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(["GET", "POST", "PUT", "DELETE"])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allowed_header(REQUEST_ID_HEADER)
        .expose_headers([
            REQUEST_ID_HEADER,
            "x-ratelimit-limit",
            "x-ratelimit-remaining",
            "retry-after",
        ])
        .max_age(PREFLIGHT_MAX_AGE)
}
