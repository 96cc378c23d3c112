use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Kind of writing artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Article,
    Book,
}

/// Top-level writing artifact owned by a user.
///
/// Stored in the `documents` collection. `word_count` and
/// `reading_time_minutes` are derived from `content` on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub content: Option<String>,
    pub user_id: i64,
    pub word_count: u32,
    pub reading_time_minutes: u32,
    /// Free-text tag list as typed by the author (e.g. `"rust, async"`).
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub published_to_write_it: bool,
    /// Assigned on first publication to the blog, never changed afterwards.
    #[serde(default)]
    pub write_it_slug: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// A chapter of a document. `position` orders chapters for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: i64,
    pub document_id: i64,
    pub title: String,
    pub position: i32,
}

/// A section of a chapter, ordered like chapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: i64,
    pub chapter_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub position: i32,
}

/// Reusable text fragment kept by a user, independent of any document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub title: String,
    pub content: String,
}

/// Metadata of a media attachment. The bytes, when uploaded, live in object
/// storage and are reachable through `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub id: i64,
    pub document_id: i64,
    pub file_name: String,
    pub mime_type: String,
    pub url: String,
    #[serde(default)]
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// Immutable snapshot of a document's title and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    pub id: i64,
    pub document_id: i64,
    /// Sequential per document, starting at 1.
    pub version_number: i32,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub content: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl DocumentRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("Title cannot be blank".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRequest {
    pub title: String,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetRequest {
    pub user_id: i64,
    #[serde(default)]
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFileRequest {
    pub file_name: String,
    pub mime_type: String,
    pub url: String,
    #[serde(default)]
    pub size_bytes: u64,
}

/// One entry of a chapter reorder request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterReorderItem {
    pub chapter_id: i64,
    pub position: i32,
}

/// Result of a snapshot: which version number was assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    pub document_id: i64,
    pub version_number: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serializes_camel_case() {
        let now = Utc::now();
        let doc = Document {
            id: 1,
            title: "Draft".to_string(),
            doc_type: DocumentType::Book,
            content: Some("one two".to_string()),
            user_id: 9,
            word_count: 2,
            reading_time_minutes: 1,
            tags: Some("fiction".to_string()),
            category: None,
            created_at: now,
            updated_at: now,
            published_to_write_it: false,
            write_it_slug: None,
            published_at: None,
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "BOOK");
        assert_eq!(json["userId"], 9);
        assert_eq!(json["wordCount"], 2);
        assert_eq!(json["readingTimeMinutes"], 1);
        assert_eq!(json["publishedToWriteIt"], false);

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_document_publish_defaults() {
        // Records written before publishing existed carry no publish fields.
        let json = r###"{
            "id": 4,
            "title": "Old",
            "type": "ARTICLE",
            "userId": 1,
            "wordCount": 0,
            "readingTimeMinutes": 0,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"###;

        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(!doc.published_to_write_it);
        assert_eq!(doc.write_it_slug, None);
        assert_eq!(doc.published_at, None);
        assert_eq!(doc.content, None);
    }

    #[test]
    fn test_document_request_requires_type_and_user() {
        let missing_type = r###"{ "title": "T", "userId": 1 }"###;
        assert!(serde_json::from_str::<DocumentRequest>(missing_type).is_err());

        let missing_user = r###"{ "title": "T", "type": "ARTICLE" }"###;
        assert!(serde_json::from_str::<DocumentRequest>(missing_user).is_err());

        let unknown_type = r###"{ "title": "T", "type": "POEM", "userId": 1 }"###;
        assert!(serde_json::from_str::<DocumentRequest>(unknown_type).is_err());
    }

    #[test]
    fn test_document_request_rejects_blank_title() {
        let req: DocumentRequest =
            serde_json::from_str(r###"{ "title": "   ", "type": "BOOK", "userId": 1 }"###)
                .unwrap();
        match req.validate() {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("Title")),
            other => panic!("Expected BadRequest, got: {:?}", other),
        }
    }

    #[test]
    fn test_chapter_request_ignores_client_ids() {
        let req: ChapterRequest = serde_json::from_str(
            r###"{ "id": 99, "documentId": 42, "title": "Intro" }"###,
        )
        .unwrap();
        assert_eq!(req.title, "Intro");
        assert_eq!(req.position, 0);
    }
}
