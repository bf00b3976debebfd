//! HTTP surface of the blog: registration, login, and posts.

pub mod auth;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod posts;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    handler::Handler,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use medium_types::api::HealthResponse;

use crate::auth::AppState;

/// 10 MB, enough for a handful of inline base64 images.
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the full application. Only post creation sits behind [`middleware::require_auth`].
pub fn router(state: AppState, body_limit: usize) -> Router {
    let require_auth = axum::middleware::from_fn_with_state(state.clone(), middleware::require_auth);

    Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route(
            "/api/posts",
            get(posts::list_posts).post(posts::create_post.layer(require_auth)),
        )
        .route("/api/posts/{id}", get(posts::get_post))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}
