use axum::extract::{Path, State};
use axum::Json;

use crate::db::models::Document;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/v1/blog/posts`
///
/// Published documents, newest first.
pub async fn list_posts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    let posts = state.document_repo.list_published().await?;
    Ok(Json(posts))
}

/// `GET /api/v1/blog/posts/{slug}`
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Document>, AppError> {
    let post = state
        .document_repo
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{slug}' not found")))?;
    Ok(Json(post))
}
