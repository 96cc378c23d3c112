use chrono::Utc;

use crate::content::metrics::{count_words, estimate_reading_time_minutes};
use crate::db::models::{Document, DocumentRequest, DocumentVersion, SnapshotResponse};
use crate::db::repository::{DocumentFilter, DocumentRepository};
use crate::db::version_repository::VersionRepository;
use crate::error::AppError;

/// Copy the request's mutable fields onto `doc` and recompute its metrics.
fn apply_request(doc: &mut Document, request: DocumentRequest) {
    doc.title = request.title;
    doc.doc_type = request.doc_type;
    doc.content = request.content;
    doc.user_id = request.user_id;
    doc.tags = request.tags;
    doc.category = request.category;
    recalculate_metrics(doc);
}

/// Word count and reading time always move together.
fn recalculate_metrics(doc: &mut Document) {
    let words = count_words(doc.content.as_deref().unwrap_or_default());
    doc.word_count = words;
    doc.reading_time_minutes = estimate_reading_time_minutes(words);
}

/// Create a document from a validated request.
pub async fn create_document(
    repo: &dyn DocumentRepository,
    request: DocumentRequest,
) -> Result<Document, AppError> {
    request.validate()?;

    let now = Utc::now();
    let mut doc = Document {
        id: 0,
        title: String::new(),
        doc_type: request.doc_type,
        content: None,
        user_id: request.user_id,
        word_count: 0,
        reading_time_minutes: 0,
        tags: None,
        category: None,
        created_at: now,
        updated_at: now,
        published_to_write_it: false,
        write_it_slug: None,
        published_at: None,
    };
    apply_request(&mut doc, request);

    let created = repo.insert(doc).await?;
    tracing::info!(
        document_id = created.id,
        user_id = created.user_id,
        words = created.word_count,
        "Document created"
    );
    Ok(created)
}

pub async fn get_document(repo: &dyn DocumentRepository, id: i64) -> Result<Document, AppError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::document_not_found(id))
}

/// Replace every mutable field of an existing document.
///
/// Creation time and blog publication state are preserved.
pub async fn update_document(
    repo: &dyn DocumentRepository,
    id: i64,
    request: DocumentRequest,
) -> Result<Document, AppError> {
    request.validate()?;

    let mut doc = get_document(repo, id).await?;
    apply_request(&mut doc, request);
    doc.updated_at = Utc::now();

    repo.save(&doc).await?;
    Ok(doc)
}

/// Delete a document. Chapters, versions and media are left in place.
pub async fn delete_document(repo: &dyn DocumentRepository, id: i64) -> Result<(), AppError> {
    if !repo.delete(id).await? {
        return Err(AppError::document_not_found(id));
    }
    tracing::info!(document_id = id, "Document deleted");
    Ok(())
}

/// Store the document's current title and content as the next version.
///
/// The next number is read-max-then-insert without coordination: two
/// concurrent snapshots of the same document can store the same number.
pub async fn create_snapshot(
    documents: &dyn DocumentRepository,
    versions: &dyn VersionRepository,
    document_id: i64,
) -> Result<SnapshotResponse, AppError> {
    let doc = get_document(documents, document_id).await?;
    let last_version = versions
        .latest_version_number(document_id)
        .await?
        .unwrap_or(0);

    let version = versions
        .insert(DocumentVersion {
            id: 0,
            document_id,
            version_number: last_version + 1,
            title: doc.title,
            content: doc.content,
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!(
        document_id,
        version_number = version.version_number,
        "Snapshot created"
    );

    Ok(SnapshotResponse {
        document_id,
        version_number: version.version_number,
    })
}

/// Versions stored for a document, newest first.
///
/// Unknown ids yield an empty list. Versions outlive their document, so a
/// deleted document's history is still returned.
pub async fn list_versions(
    versions: &dyn VersionRepository,
    document_id: i64,
) -> Result<Vec<DocumentVersion>, AppError> {
    versions.list_by_document(document_id).await
}

/// List a user's documents. A non-blank `query` (title search) wins over a
/// non-blank `tag`; with neither every document of the user is returned.
pub async fn list_by_user(
    repo: &dyn DocumentRepository,
    user_id: i64,
    query: Option<&str>,
    tag: Option<&str>,
) -> Result<Vec<Document>, AppError> {
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    let tag = tag.map(str::trim).filter(|t| !t.is_empty());

    let filter = match (query, tag) {
        (Some(q), _) => DocumentFilter::TitleContains(q.to_string()),
        (None, Some(t)) => DocumentFilter::TagsContains(t.to_string()),
        (None, None) => DocumentFilter::All,
    };

    repo.list_by_user(user_id, &filter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::db::models::DocumentType;

    fn request(title: &str, content: Option<&str>) -> DocumentRequest {
        DocumentRequest {
            title: title.to_string(),
            doc_type: DocumentType::Article,
            content: content.map(str::to_string),
            user_id: 7,
            tags: Some("essay, draft".to_string()),
            category: Some("nonfiction".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_computes_metrics() {
        let store = MemoryStore::new();
        let content = "word ".repeat(201);

        let doc = create_document(&store, request("Essay", Some(&content)))
            .await
            .unwrap();

        assert_eq!(doc.id, 1);
        assert_eq!(doc.word_count, 201);
        assert_eq!(doc.reading_time_minutes, 2);
        assert_eq!(doc.created_at, doc.updated_at);
        assert!(!doc.published_to_write_it);

        let stored = get_document(&store, doc.id).await.unwrap();
        assert_eq!(stored, doc);
    }

    #[tokio::test]
    async fn test_create_without_content_has_zero_metrics() {
        let store = MemoryStore::new();
        let doc = create_document(&store, request("Empty", None)).await.unwrap();
        assert_eq!(doc.word_count, 0);
        assert_eq!(doc.reading_time_minutes, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let store = MemoryStore::new();
        let result = create_document(&store, request("  ", Some("text"))).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_recomputes_and_keeps_created_at() {
        let store = MemoryStore::new();
        let created = create_document(&store, request("Essay", Some("one two")))
            .await
            .unwrap();

        let mut changed = request("Essay v2", Some("one two three"));
        changed.tags = None;
        let updated = update_document(&store, created.id, changed).await.unwrap();

        assert_eq!(updated.title, "Essay v2");
        assert_eq!(updated.word_count, 3);
        assert_eq!(updated.tags, None);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let result = update_document(&store, 99, request("X", None)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let store = MemoryStore::new();
        let doc = create_document(&store, request("Gone", None)).await.unwrap();

        delete_document(&store, doc.id).await.unwrap();
        assert!(matches!(
            delete_document(&store, doc.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            get_document(&store, doc.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_snapshots_are_sequential_and_verbatim() {
        let store = MemoryStore::new();
        let doc = create_document(&store, request("Novel", Some("It was a dark night")))
            .await
            .unwrap();

        let first = create_snapshot(&store, &store, doc.id).await.unwrap();
        update_document(&store, doc.id, request("Novel", Some("It was a bright day")))
            .await
            .unwrap();
        let second = create_snapshot(&store, &store, doc.id).await.unwrap();

        assert_eq!(first.version_number, 1);
        assert_eq!(second.version_number, 2);

        let versions = list_versions(&store, doc.id).await.unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version_number, 2);
        assert_eq!(versions[0].content.as_deref(), Some("It was a bright day"));
        assert_eq!(versions[1].content.as_deref(), Some("It was a dark night"));
    }

    #[tokio::test]
    async fn test_snapshot_numbers_are_per_document() {
        let store = MemoryStore::new();
        let a = create_document(&store, request("A", None)).await.unwrap();
        let b = create_document(&store, request("B", None)).await.unwrap();

        create_snapshot(&store, &store, a.id).await.unwrap();
        create_snapshot(&store, &store, a.id).await.unwrap();
        let first_of_b = create_snapshot(&store, &store, b.id).await.unwrap();

        assert_eq!(first_of_b.version_number, 1);
    }

    #[tokio::test]
    async fn test_snapshot_of_missing_document() {
        let store = MemoryStore::new();
        assert!(matches!(
            create_snapshot(&store, &store, 5).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_versions_empty_for_new_or_unknown_document() {
        let store = MemoryStore::new();
        let doc = create_document(&store, request("Fresh", None)).await.unwrap();
        assert!(list_versions(&store, doc.id).await.unwrap().is_empty());
        assert!(list_versions(&store, 12_345).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_versions_survive_document_delete() {
        let store = MemoryStore::new();
        let doc = create_document(&store, request("Doomed", Some("last words")))
            .await
            .unwrap();
        create_snapshot(&store, &store, doc.id).await.unwrap();
        delete_document(&store, doc.id).await.unwrap();

        let versions = list_versions(&store, doc.id).await.unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version_number, 1);
        assert_eq!(versions[0].content.as_deref(), Some("last words"));
    }

    #[tokio::test]
    async fn test_list_by_user_query_wins_over_tag() {
        let store = MemoryStore::new();
        create_document(&store, request("Rust Notes", None)).await.unwrap();
        let mut tagged = request("Garden", None);
        tagged.tags = Some("Outdoors".to_string());
        create_document(&store, tagged).await.unwrap();

        let by_query = list_by_user(&store, 7, Some(" rust "), Some("outdoors"))
            .await
            .unwrap();
        assert_eq!(by_query.len(), 1);
        assert_eq!(by_query[0].title, "Rust Notes");

        let by_tag = list_by_user(&store, 7, Some("   "), Some("OUTDOORS"))
            .await
            .unwrap();
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].title, "Garden");

        let all = list_by_user(&store, 7, None, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let other_user = list_by_user(&store, 8, None, None).await.unwrap();
        assert!(other_user.is_empty());
    }
}
