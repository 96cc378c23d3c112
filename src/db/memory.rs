use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::chapter_repository::ChapterRepository;
use crate::db::media_repository::MediaRepository;
use crate::db::models::{Chapter, Document, DocumentVersion, MediaFile, Section, Snippet};
use crate::db::repository::{DocumentFilter, DocumentRepository};
use crate::db::section_repository::SectionRepository;
use crate::db::snippet_repository::SnippetRepository;
use crate::db::version_repository::VersionRepository;
use crate::error::AppError;

/// One id-keyed table with its own id counter.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, assign_id: impl FnOnce(&mut T, i64), mut row: T) -> T {
        self.last_id += 1;
        assign_id(&mut row, self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|r| predicate(r)).cloned().collect()
    }
}

#[derive(Debug, Default)]
struct Tables {
    documents: Table<Document>,
    chapters: Table<Chapter>,
    sections: Table<Section>,
    snippets: Table<Snippet>,
    media: Table<MediaFile>,
    versions: Table<DocumentVersion>,
}

/// Process-local store implementing every repository trait.
///
/// Used by the `memory` database backend (local development, demos) and by
/// tests. Each call takes the lock independently; compound operations built
/// on top of several calls are not atomic, just like on MongoDB.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

#[async_trait]
impl DocumentRepository for MemoryStore {
    async fn insert(&self, doc: Document) -> Result<Document, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.documents.insert_with(|d, id| d.id = id, doc))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Document>, AppError> {
        Ok(self.tables.read().await.documents.rows.get(&id).cloned())
    }

    async fn save(&self, doc: &Document) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        match tables.documents.rows.get_mut(&doc.id) {
            Some(existing) => {
                *existing = doc.clone();
                Ok(())
            }
            None => Err(AppError::document_not_found(doc.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.documents.rows.remove(&id).is_some())
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        filter: &DocumentFilter,
    ) -> Result<Vec<Document>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.documents.filtered(|d| {
            d.user_id == user_id
                && match filter {
                    DocumentFilter::All => true,
                    DocumentFilter::TitleContains(q) => contains_ignore_case(Some(&d.title), q),
                    DocumentFilter::TagsContains(t) => contains_ignore_case(d.tags.as_deref(), t),
                }
        }))
    }

    async fn list_published(&self) -> Result<Vec<Document>, AppError> {
        let tables = self.tables.read().await;
        let mut published = tables.documents.filtered(|d| d.published_to_write_it);
        published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(published)
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Document>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .rows
            .values()
            .find(|d| d.published_to_write_it && d.write_it_slug.as_deref() == Some(slug))
            .cloned())
    }
}

#[async_trait]
impl ChapterRepository for MemoryStore {
    async fn insert(&self, chapter: Chapter) -> Result<Chapter, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.chapters.insert_with(|c, id| c.id = id, chapter))
    }

    async fn list_by_document(&self, document_id: i64) -> Result<Vec<Chapter>, AppError> {
        let tables = self.tables.read().await;
        // Rows come out in id order, so a stable sort keeps ties by id.
        let mut chapters = tables.chapters.filtered(|c| c.document_id == document_id);
        chapters.sort_by_key(|c| c.position);
        Ok(chapters)
    }

    async fn save_all(&self, chapters: &[Chapter]) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        for chapter in chapters {
            if let Some(existing) = tables.chapters.rows.get_mut(&chapter.id) {
                *existing = chapter.clone();
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SectionRepository for MemoryStore {
    async fn insert(&self, section: Section) -> Result<Section, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.sections.insert_with(|s, id| s.id = id, section))
    }

    async fn list_by_chapter(&self, chapter_id: i64) -> Result<Vec<Section>, AppError> {
        let tables = self.tables.read().await;
        let mut sections = tables.sections.filtered(|s| s.chapter_id == chapter_id);
        sections.sort_by_key(|s| s.position);
        Ok(sections)
    }
}

#[async_trait]
impl SnippetRepository for MemoryStore {
    async fn insert(&self, snippet: Snippet) -> Result<Snippet, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.snippets.insert_with(|s, id| s.id = id, snippet))
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Snippet>, AppError> {
        let tables = self.tables.read().await;
        let mut snippets = tables.snippets.filtered(|s| s.user_id == user_id);
        snippets.reverse();
        Ok(snippets)
    }
}

#[async_trait]
impl MediaRepository for MemoryStore {
    async fn insert(&self, media: MediaFile) -> Result<MediaFile, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.media.insert_with(|m, id| m.id = id, media))
    }

    async fn list_by_document(&self, document_id: i64) -> Result<Vec<MediaFile>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.media.filtered(|m| m.document_id == document_id))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<MediaFile>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.media.rows.values().find(|m| m.url == url).cloned())
    }
}

#[async_trait]
impl VersionRepository for MemoryStore {
    async fn insert(&self, version: DocumentVersion) -> Result<DocumentVersion, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.versions.insert_with(|v, id| v.id = id, version))
    }

    async fn latest_version_number(&self, document_id: i64) -> Result<Option<i32>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .versions
            .rows
            .values()
            .filter(|v| v.document_id == document_id)
            .map(|v| v.version_number)
            .max())
    }

    async fn list_by_document(
        &self,
        document_id: i64,
    ) -> Result<Vec<DocumentVersion>, AppError> {
        let tables = self.tables.read().await;
        let mut versions = tables.versions.filtered(|v| v.document_id == document_id);
        versions.sort_by(|a, b| b.version_number.cmp(&a.version_number).then(b.id.cmp(&a.id)));
        Ok(versions)
    }
}
