use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};

use medium_store::NewPost;
use medium_types::Claims;
use medium_types::api::CreatePostRequest;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::{JsonOrForm, required};

/// POST /api/posts. The author is whoever the verified token names.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonOrForm(req): JsonOrForm<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(title), Some(content)) = (required(req.title), required(req.content)) else {
        return Err(ApiError::BadRequest("title and content are required".into()));
    };

    if let Some(author) = req.author.as_deref() {
        if author != claims.username {
            debug!("Ignoring client-supplied author '{}' for {}", author, claims.username);
        }
    }

    let created_at = required(req.created_at).unwrap_or_else(now_iso);

    let post = state.store.create_post(NewPost {
        title,
        content,
        images: req.images.unwrap_or_default(),
        author: claims.username,
        created_at,
    })?;

    info!("Created post {} by {}", post.id, post.author);

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts. The whole feed in insertion order.
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.list_posts()?))
}

/// GET /api/posts/{id}. A non-numeric id cannot name a post, so it is a 404 too.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let not_found = || ApiError::NotFound("post not found".into());

    let id: i64 = id.parse().map_err(|_| not_found())?;
    let post = state.store.get_post(id)?.ok_or_else(not_found)?;

    Ok(Json(post))
}

/// Same shape a browser's `Date.toISOString()` produces.
fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
