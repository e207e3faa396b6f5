use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Parse configured origins into header values.
///
/// Any origin that is not a valid header value fails the whole list.
pub fn parse_allowed_origins(origins: &[String]) -> io::Result<Vec<HeaderValue>> {
    origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS_ALLOWED_ORIGIN value '{}': {}", origin, e),
                )
            })
        })
        .collect()
}

/// CORS layer for the catalog API.
///
/// Allows the listed origins with the methods the API serves
/// (GET, POST, PATCH, DELETE, OPTIONS) and a one hour preflight cache.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}
