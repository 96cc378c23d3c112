use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::api::extract::{AppJson, AppQuery};
use crate::db::models::{Snippet, SnippetRequest};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetListQuery {
    pub user_id: i64,
}

/// `GET /api/v1/snippets?userId=`, newest first.
pub async fn list_snippets_handler(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SnippetListQuery>,
) -> Result<Json<Vec<Snippet>>, AppError> {
    let snippets = state.snippet_repo.list_by_user(params.user_id).await?;
    Ok(Json(snippets))
}

/// `POST /api/v1/snippets`
pub async fn create_snippet_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<SnippetRequest>,
) -> Result<Json<Snippet>, AppError> {
    let snippet = state
        .snippet_repo
        .insert(Snippet {
            id: 0,
            user_id: request.user_id,
            title: request.title,
            content: request.content,
        })
        .await?;
    Ok(Json(snippet))
}

/// `POST /api/v1/snippets/{snippetId}/drop-in/{documentId}`
///
/// Insertion happens client-side; the server only acknowledges.
pub async fn drop_in_handler(Path((snippet_id, document_id)): Path<(i64, i64)>) -> String {
    format!("Snippet {snippet_id} is ready to be inserted into document {document_id}")
}
