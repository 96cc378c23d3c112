use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use crate::api::extract::AppJson;
use crate::db::models::{MediaFile, MediaFileRequest};
use crate::error::AppError;
use crate::state::AppState;

/// URL prefix under which uploaded media bytes are served.
pub const MEDIA_URL_PREFIX: &str = "/api/v1/media/";

/// Content types accepted by the upload endpoint.
fn is_allowed_media_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
        || content_type.starts_with("audio/")
        || content_type.starts_with("video/")
        || content_type == "application/pdf"
}

/// Keep alphanumerics, dots and dashes; everything else becomes `_`.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

/// Infer a content type from the file extension.
fn content_type_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".svg") {
        "image/svg+xml"
    } else if lower.ends_with(".mp3") {
        "audio/mpeg"
    } else if lower.ends_with(".mp4") {
        "video/mp4"
    } else if lower.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

/// `GET /api/v1/documents/{id}/media`
pub async fn list_media_handler(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
) -> Result<Json<Vec<MediaFile>>, AppError> {
    let media = state.media_repo.list_by_document(document_id).await?;
    Ok(Json(media))
}

/// `POST /api/v1/documents/{id}/media`
///
/// Registers metadata for media hosted elsewhere.
pub async fn create_media_handler(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
    AppJson(request): AppJson<MediaFileRequest>,
) -> Result<Json<MediaFile>, AppError> {
    let media = state
        .media_repo
        .insert(MediaFile {
            id: 0,
            document_id,
            file_name: request.file_name,
            mime_type: request.mime_type,
            url: request.url,
            size_bytes: request.size_bytes,
            created_at: Utc::now(),
        })
        .await?;
    Ok(Json(media))
}

/// `POST /api/v1/documents/{id}/media/upload`
///
/// Accepts a multipart form with a single file field named "file", stores
/// the bytes in object storage under `media/` and records the attachment.
pub async fn upload_media_handler(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<MediaFile>, AppError> {
    if !state.document_repo.exists(document_id).await? {
        return Err(AppError::document_not_found(document_id));
    }

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        if !is_allowed_media_type(&content_type) {
            return Err(AppError::BadRequest(format!(
                "Unsupported media type '{content_type}'"
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;

        let stored_name = format!(
            "{}_{}",
            uuid::Uuid::new_v4().simple(),
            sanitize_file_name(&file_name)
        );
        let key = format!("media/{stored_name}");
        let size_bytes = data.len() as u64;

        state
            .storage_client
            .put_object(&key, data.to_vec(), &content_type)
            .await?;

        let media = state
            .media_repo
            .insert(MediaFile {
                id: 0,
                document_id,
                file_name,
                mime_type: content_type,
                url: format!("{MEDIA_URL_PREFIX}{stored_name}"),
                size_bytes,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(document_id, media_id = media.id, size_bytes, "Media uploaded");
        return Ok(Json(media));
    }

    Err(AppError::BadRequest("No file field found in request".into()))
}

/// `GET /api/v1/media/{fileName}`
pub async fn serve_media_handler(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, AppError> {
    let data = state
        .storage_client
        .get_object(&format!("media/{file_name}"))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Media '{file_name}' not found")))?;

    let content_type = match state
        .media_repo
        .find_by_url(&format!("{MEDIA_URL_PREFIX}{file_name}"))
        .await?
    {
        Some(media) => media.mime_type,
        None => content_type_for(&file_name).to_string(),
    };

    Ok(([(axum::http::header::CONTENT_TYPE, content_type)], data).into_response())
}
