pub mod auth;
pub mod cv;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::middleware::{auth::require_bearer_auth, cors::cors_layer, rate_limit};
use crate::AppState;

/// Room for a 5 MiB picture once base64 has inflated it, plus the rest of the form.
const BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState, config: &Config) -> Router {
    let base_routes = Router::new().route("/health", get(health::health));

    let auth_api = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(config.auth_rps),
            rate_limit::rps_middleware,
        ));

    let cv_api = Router::new()
        .route("/api/cvs", get(cv::list_cvs).post(cv::create_cv))
        .route("/api/cvs/validate", post(cv::validate_cv))
        .route("/api/cvs/stats", get(cv::cv_stats))
        .route(
            "/api/cvs/:id",
            get(cv::get_cv)
                .put(cv::replace_cv)
                .patch(cv::patch_cv)
                .delete(cv::delete_cv),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth,
        ));

    base_routes
        .merge(auth_api)
        .merge(cv_api)
        .with_state(state)
        .layer(cors_layer(config.frontend_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
