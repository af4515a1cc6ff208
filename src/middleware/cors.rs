use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}

/// Locks CORS to the frontend origin when one is configured.
pub fn cors_layer(frontend_origin: Option<&str>) -> CorsLayer {
    let Some(origin) = frontend_origin else {
        return permissive_cors();
    };
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        Err(_) => {
            tracing::warn!(origin, "FRONTEND_ORIGIN is not a valid header value; using permissive CORS");
            permissive_cors()
        }
    }
}
