use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Build CORS middleware.
///
/// The token endpoints are called cross-origin by the hosted web client, so
/// with no configured origins the middleware stays permissive (any origin,
/// preflight answered automatically). Setting CORS_ALLOWED_ORIGINS to a
/// comma-separated origin list locks it down.
pub fn cors_middleware() -> Cors {
    // e.g. CORS_ALLOWED_ORIGINS=https://app.greenquest.eco,http://localhost:5173
    let allowed_raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

    let allowed_origins: Vec<String> = allowed_raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    for origin in allowed_origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
