use axum::extract::{Path, State};
use axum::Json;

use crate::api::extract::AppJson;
use crate::db::chapter_repository::ChapterRepository;
use crate::db::models::{Chapter, ChapterReorderItem, ChapterRequest, Section, SectionRequest};
use crate::db::section_repository::SectionRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Apply reorder items to the chapters of a document and persist them.
///
/// A document without chapters is reported as not found. Items naming a
/// chapter that does not belong to the document are skipped. Returns the
/// saved chapters in the order they were loaded, i.e. by their previous
/// positions.
pub async fn process_reorder(
    repo: &dyn ChapterRepository,
    document_id: i64,
    items: &[ChapterReorderItem],
) -> Result<Vec<Chapter>, AppError> {
    let mut chapters = repo.list_by_document(document_id).await?;
    if chapters.is_empty() {
        return Err(AppError::NotFound(format!(
            "Document {document_id} has no chapters"
        )));
    }

    for item in items {
        match chapters.iter_mut().find(|c| c.id == item.chapter_id) {
            Some(chapter) => chapter.position = item.position,
            None => tracing::debug!(
                document_id,
                chapter_id = item.chapter_id,
                "Ignoring reorder item for unknown chapter"
            ),
        }
    }

    repo.save_all(&chapters).await?;
    Ok(chapters)
}

/// `GET /api/v1/documents/{id}/chapters`
pub async fn list_chapters_handler(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
) -> Result<Json<Vec<Chapter>>, AppError> {
    let chapters = state.chapter_repo.list_by_document(document_id).await?;
    Ok(Json(chapters))
}

/// `POST /api/v1/documents/{id}/chapters`
pub async fn create_chapter_handler(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
    AppJson(request): AppJson<ChapterRequest>,
) -> Result<Json<Chapter>, AppError> {
    let chapter = state
        .chapter_repo
        .insert(Chapter {
            id: 0,
            document_id,
            title: request.title,
            position: request.position,
        })
        .await?;
    Ok(Json(chapter))
}

/// `PATCH /api/v1/documents/{id}/chapters/reorder`
pub async fn reorder_chapters_handler(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
    AppJson(items): AppJson<Vec<ChapterReorderItem>>,
) -> Result<Json<Vec<Chapter>>, AppError> {
    let chapters = process_reorder(state.chapter_repo.as_ref(), document_id, &items).await?;
    Ok(Json(chapters))
}

/// `GET /api/v1/chapters/{id}/sections`
pub async fn list_sections_handler(
    State(state): State<AppState>,
    Path(chapter_id): Path<i64>,
) -> Result<Json<Vec<Section>>, AppError> {
    let sections = state.section_repo.list_by_chapter(chapter_id).await?;
    Ok(Json(sections))
}

/// `POST /api/v1/chapters/{id}/sections`
pub async fn create_section_handler(
    State(state): State<AppState>,
    Path(chapter_id): Path<i64>,
    AppJson(request): AppJson<SectionRequest>,
) -> Result<Json<Section>, AppError> {
    let section = state
        .section_repo
        .insert(Section {
            id: 0,
            chapter_id,
            title: request.title,
            content: request.content,
            position: request.position,
        })
        .await?;
    Ok(Json(section))
}
