//! CORS layer for the Web API.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Build the CORS layer from the configured origins.
///
/// An empty origin list yields a layer that allows no cross-origin
/// callers; origins that fail to parse are skipped with a warning.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring unparseable CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
