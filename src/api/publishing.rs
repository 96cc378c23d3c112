use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::extract::AppJson;
use crate::content::slug::blog_slug;
use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishChannel {
    Medium,
    Kdp,
    WriteIt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishStatus {
    Queued,
    ReadyForUpload,
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub channel: PublishChannel,
    pub status: PublishStatus,
    pub external_url: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediumPublishRequest {
    pub document_id: i64,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub canonical_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KdpPublishRequest {
    pub document_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteItPublishRequest {
    pub document_id: i64,
}

async fn require_document(repo: &dyn DocumentRepository, id: i64) -> Result<(), AppError> {
    if repo.exists(id).await? {
        Ok(())
    } else {
        Err(AppError::document_not_found(id))
    }
}

/// Queue a document for Medium. Nothing leaves the process.
pub async fn process_medium(
    repo: &dyn DocumentRepository,
    request: &MediumPublishRequest,
) -> Result<PublishResponse, AppError> {
    require_document(repo, request.document_id).await?;

    tracing::info!(
        document_id = request.document_id,
        tags = ?request.tags,
        canonical_url = ?request.canonical_url,
        "Medium publication queued"
    );

    Ok(PublishResponse {
        channel: PublishChannel::Medium,
        status: PublishStatus::Queued,
        external_url: format!("https://medium.com/@writeit/mock-{}", request.document_id),
        generated_at: Utc::now(),
    })
}

/// Prepare a Kindle Direct Publishing title setup.
pub async fn process_kdp(
    repo: &dyn DocumentRepository,
    request: &KdpPublishRequest,
) -> Result<PublishResponse, AppError> {
    require_document(repo, request.document_id).await?;

    tracing::info!(
        document_id = request.document_id,
        keywords = ?request.keywords,
        categories = ?request.categories,
        has_cover = request.cover_url.is_some(),
        has_description = request.description.is_some(),
        "KDP package prepared"
    );

    Ok(PublishResponse {
        channel: PublishChannel::Kdp,
        status: PublishStatus::ReadyForUpload,
        external_url: format!(
            "https://kdp.amazon.com/en_US/title-setup/mock-{}",
            request.document_id
        ),
        generated_at: Utc::now(),
    })
}

/// Publish a document to the built-in blog.
///
/// The slug is derived from the title on first publication and kept on
/// every later one; `published_at` moves forward each time.
pub async fn process_write_it(
    repo: &dyn DocumentRepository,
    request: &WriteItPublishRequest,
) -> Result<PublishResponse, AppError> {
    let mut doc = repo
        .find_by_id(request.document_id)
        .await?
        .ok_or_else(|| AppError::document_not_found(request.document_id))?;

    let slug = match doc.write_it_slug.clone() {
        Some(existing) => existing,
        None => blog_slug(&doc.title, doc.id),
    };

    let now = Utc::now();
    doc.published_to_write_it = true;
    doc.write_it_slug = Some(slug.clone());
    doc.published_at = Some(now);
    doc.updated_at = now;
    repo.save(&doc).await?;

    tracing::info!(document_id = doc.id, slug = %slug, "Document published to blog");

    Ok(PublishResponse {
        channel: PublishChannel::WriteIt,
        status: PublishStatus::Published,
        external_url: format!("/blog/{slug}"),
        generated_at: now,
    })
}

/// `POST /api/v1/publishing/medium`
pub async fn medium_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<MediumPublishRequest>,
) -> Result<Json<PublishResponse>, AppError> {
    let response = process_medium(state.document_repo.as_ref(), &request).await?;
    Ok(Json(response))
}

/// `POST /api/v1/publishing/kdp`
pub async fn kdp_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<KdpPublishRequest>,
) -> Result<Json<PublishResponse>, AppError> {
    let response = process_kdp(state.document_repo.as_ref(), &request).await?;
    Ok(Json(response))
}

/// `POST /api/v1/publishing/write-it`
pub async fn write_it_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<WriteItPublishRequest>,
) -> Result<Json<PublishResponse>, AppError> {
    let response = process_write_it(state.document_repo.as_ref(), &request).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::db::models::{DocumentRequest, DocumentType};
    use crate::service::documents::{create_document, get_document, update_document};

    async fn new_document(store: &MemoryStore, title: &str) -> i64 {
        create_document(
            store,
            DocumentRequest {
                title: title.to_string(),
                doc_type: DocumentType::Article,
                content: Some("Some words here".to_string()),
                user_id: 1,
                tags: None,
                category: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[test]
    fn test_response_serializes_enums() {
        let response = PublishResponse {
            channel: PublishChannel::Kdp,
            status: PublishStatus::ReadyForUpload,
            external_url: "x".to_string(),
            generated_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["channel"], "KDP");
        assert_eq!(json["status"], "READY_FOR_UPLOAD");
        assert_eq!(json["externalUrl"], "x");
        assert!(json["generatedAt"].is_string());

        let write_it = serde_json::to_value(PublishChannel::WriteIt).unwrap();
        assert_eq!(write_it, "WRITE_IT");
    }

    #[test]
    fn test_requests_require_document_id() {
        assert!(serde_json::from_str::<MediumPublishRequest>(r#"{ "tags": ["a"] }"#).is_err());
        assert!(serde_json::from_str::<KdpPublishRequest>("{}").is_err());
        assert!(serde_json::from_str::<WriteItPublishRequest>("{}").is_err());

        let kdp: KdpPublishRequest =
            serde_json::from_str(r#"{ "documentId": 4, "coverUrl": "c.png" }"#).unwrap();
        assert_eq!(kdp.document_id, 4);
        assert_eq!(kdp.cover_url.as_deref(), Some("c.png"));
    }

    #[tokio::test]
    async fn test_medium_and_kdp_urls() {
        let store = MemoryStore::new();
        let id = new_document(&store, "Essay").await;

        let medium = process_medium(
            &store,
            &MediumPublishRequest { document_id: id, tags: None, canonical_url: None },
        )
        .await
        .unwrap();
        assert_eq!(medium.channel, PublishChannel::Medium);
        assert_eq!(medium.status, PublishStatus::Queued);
        assert_eq!(medium.external_url, format!("https://medium.com/@writeit/mock-{id}"));

        let kdp = process_kdp(
            &store,
            &KdpPublishRequest {
                document_id: id,
                description: None,
                keywords: None,
                categories: None,
                cover_url: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(kdp.status, PublishStatus::ReadyForUpload);
        assert_eq!(
            kdp.external_url,
            format!("https://kdp.amazon.com/en_US/title-setup/mock-{id}")
        );
    }

    #[tokio::test]
    async fn test_unknown_document_is_not_found() {
        let store = MemoryStore::new();
        let medium = process_medium(
            &store,
            &MediumPublishRequest { document_id: 77, tags: None, canonical_url: None },
        )
        .await;
        assert!(matches!(medium, Err(AppError::NotFound(_))));

        let write_it = process_write_it(&store, &WriteItPublishRequest { document_id: 77 }).await;
        assert!(matches!(write_it, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_write_it_marks_document_published() {
        let store = MemoryStore::new();
        let id = new_document(&store, "Hello, World!").await;

        let response = process_write_it(&store, &WriteItPublishRequest { document_id: id })
            .await
            .unwrap();
        assert_eq!(response.channel, PublishChannel::WriteIt);
        assert_eq!(response.status, PublishStatus::Published);
        assert_eq!(response.external_url, format!("/blog/hello-world-{id}"));

        let doc = get_document(&store, id).await.unwrap();
        assert!(doc.published_to_write_it);
        assert_eq!(doc.write_it_slug, Some(format!("hello-world-{id}")));
        assert_eq!(doc.published_at, Some(response.generated_at));
    }

    #[tokio::test]
    async fn test_republish_keeps_slug_and_moves_published_at() {
        let store = MemoryStore::new();
        let id = new_document(&store, "First Title").await;

        let first = process_write_it(&store, &WriteItPublishRequest { document_id: id })
            .await
            .unwrap();

        update_document(
            &store,
            id,
            DocumentRequest {
                title: "Renamed Later".to_string(),
                doc_type: DocumentType::Article,
                content: None,
                user_id: 1,
                tags: None,
                category: None,
            },
        )
        .await
        .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = process_write_it(&store, &WriteItPublishRequest { document_id: id })
            .await
            .unwrap();

        assert_eq!(first.external_url, second.external_url);
        assert!(second.generated_at > first.generated_at);

        let doc = get_document(&store, id).await.unwrap();
        assert_eq!(doc.write_it_slug, Some(format!("first-title-{id}")));
        assert_eq!(doc.published_at, Some(second.generated_at));
    }
}
