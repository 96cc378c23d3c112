use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::api::extract::{AppJson, AppQuery};
use crate::db::models::{Document, DocumentRequest, DocumentVersion, SnapshotResponse};
use crate::error::AppError;
use crate::service::documents;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    pub user_id: i64,
    pub query: Option<String>,
    pub tag: Option<String>,
}

/// `GET /api/v1/documents?userId=&query=&tag=`
pub async fn list_documents_handler(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListDocumentsQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    let docs = documents::list_by_user(
        state.document_repo.as_ref(),
        params.user_id,
        params.query.as_deref(),
        params.tag.as_deref(),
    )
    .await?;
    Ok(Json(docs))
}

/// `GET /api/v1/documents/{id}`
pub async fn get_document_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Document>, AppError> {
    let doc = documents::get_document(state.document_repo.as_ref(), id).await?;
    Ok(Json(doc))
}

/// `POST /api/v1/documents`, answered with 201 and a `Location` header.
pub async fn create_document_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<DocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = documents::create_document(state.document_repo.as_ref(), request).await?;
    let location = format!("/api/v1/documents/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// `PUT /api/v1/documents/{id}`
pub async fn update_document_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(request): AppJson<DocumentRequest>,
) -> Result<Json<Document>, AppError> {
    let updated = documents::update_document(state.document_repo.as_ref(), id, request).await?;
    Ok(Json(updated))
}

/// `DELETE /api/v1/documents/{id}`
pub async fn delete_document_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    documents::delete_document(state.document_repo.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/v1/documents/{id}/snapshots`
pub async fn create_snapshot_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let snapshot = documents::create_snapshot(
        state.document_repo.as_ref(),
        state.version_repo.as_ref(),
        id,
    )
    .await?;
    Ok(Json(snapshot))
}

/// `GET /api/v1/documents/{id}/versions`
pub async fn list_versions_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<DocumentVersion>>, AppError> {
    let versions = documents::list_versions(state.version_repo.as_ref(), id).await?;
    Ok(Json(versions))
}
