use axum::extract::{Path, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::api::extract::AppQuery;
use crate::content::slug::file_stem;
use crate::db::models::Document;
use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Export formats. Only Markdown and HTML carry real content; PDF and EPUB
/// are placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[serde(alias = "MARKDOWN")]
    Markdown,
    #[serde(alias = "HTML")]
    Html,
    #[serde(alias = "PDF")]
    Pdf,
    #[serde(alias = "EPUB")]
    Epub,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Markdown,
        ExportFormat::Html,
        ExportFormat::Pdf,
        ExportFormat::Epub,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Epub => "epub",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Html => "text/html",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Epub => "application/epub+zip",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub file_name: String,
    pub mime_type: String,
    pub content_base64: String,
}

/// Render the export payload for a document.
pub fn build_export(doc: &Document, format: ExportFormat) -> ExportResponse {
    let title = &doc.title;
    let content = doc.content.as_deref().unwrap_or_default();

    let body = match format {
        ExportFormat::Markdown => format!("# {title}\n\n{content}"),
        ExportFormat::Html => format!("<h1>{title}</h1>{content}"),
        ExportFormat::Pdf => format!("PDF export placeholder for: {title}"),
        ExportFormat::Epub => format!("EPUB export placeholder for: {title}"),
    };

    ExportResponse {
        file_name: format!("{}.{}", file_stem(title), format.extension()),
        mime_type: format.mime_type().to_string(),
        content_base64: STANDARD.encode(body.as_bytes()),
    }
}

pub async fn process_export(
    repo: &dyn DocumentRepository,
    document_id: i64,
    format: ExportFormat,
) -> Result<ExportResponse, AppError> {
    let doc = repo
        .find_by_id(document_id)
        .await?
        .ok_or_else(|| AppError::document_not_found(document_id))?;
    Ok(build_export(&doc, format))
}

/// `GET /api/v1/documents/{id}/export?format=markdown|html|pdf|epub`
pub async fn export_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppQuery(params): AppQuery<ExportQuery>,
) -> Result<Json<ExportResponse>, AppError> {
    let response = process_export(state.document_repo.as_ref(), id, params.format).await?;
    Ok(Json(response))
}
