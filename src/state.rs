use std::sync::Arc;

use crate::config::{AppConfig, DatabaseBackend, StorageBackend};
use crate::db::chapter_repository::{ChapterRepository, MongoChapterRepository};
use crate::db::media_repository::{MediaRepository, MongoMediaRepository};
use crate::db::memory::MemoryStore;
use crate::db::repository::{DocumentRepository, MongoDocumentRepository};
use crate::db::section_repository::{MongoSectionRepository, SectionRepository};
use crate::db::snippet_repository::{MongoSnippetRepository, SnippetRepository};
use crate::db::version_repository::{MongoVersionRepository, VersionRepository};
use crate::error::AppError;
use crate::storage::client::{MemoryStorageClient, S3StorageClient, StorageClient};

/// Shared handler state: one repository per collection plus blob storage.
#[derive(Clone)]
pub struct AppState {
    pub document_repo: Arc<dyn DocumentRepository>,
    pub chapter_repo: Arc<dyn ChapterRepository>,
    pub section_repo: Arc<dyn SectionRepository>,
    pub snippet_repo: Arc<dyn SnippetRepository>,
    pub media_repo: Arc<dyn MediaRepository>,
    pub version_repo: Arc<dyn VersionRepository>,
    pub storage_client: Arc<dyn StorageClient>,
}

impl AppState {
    /// State backed entirely by process memory.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_store(store, Arc::new(MemoryStorageClient::new()))
    }

    /// Every repository served by the same in-memory store.
    pub fn with_store(store: Arc<MemoryStore>, storage_client: Arc<dyn StorageClient>) -> Self {
        Self {
            document_repo: store.clone(),
            chapter_repo: store.clone(),
            section_repo: store.clone(),
            snippet_repo: store.clone(),
            media_repo: store.clone(),
            version_repo: store,
            storage_client,
        }
    }

    /// Every repository backed by the given MongoDB database. Indexes are
    /// created if missing.
    pub async fn with_mongo(
        db: &mongodb::Database,
        storage_client: Arc<dyn StorageClient>,
    ) -> Result<Self, AppError> {
        let documents = MongoDocumentRepository::new(db);
        let chapters = MongoChapterRepository::new(db);
        let sections = MongoSectionRepository::new(db);
        let snippets = MongoSnippetRepository::new(db);
        let media = MongoMediaRepository::new(db);
        let versions = MongoVersionRepository::new(db);

        documents.ensure_indexes().await?;
        chapters.ensure_indexes().await?;
        sections.ensure_indexes().await?;
        snippets.ensure_indexes().await?;
        media.ensure_indexes().await?;
        versions.ensure_indexes().await?;

        Ok(Self {
            document_repo: Arc::new(documents),
            chapter_repo: Arc::new(chapters),
            section_repo: Arc::new(sections),
            snippet_repo: Arc::new(snippets),
            media_repo: Arc::new(media),
            version_repo: Arc::new(versions),
            storage_client,
        })
    }

    /// Build the state described by the configuration, connecting to
    /// MongoDB and S3 when those backends are selected.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let storage_client: Arc<dyn StorageClient> = match config.storage.backend {
            StorageBackend::S3 => {
                let client = S3StorageClient::from_settings(&config.storage).await?;
                tracing::info!("S3 storage client initialized (bucket {})", config.storage.s3_bucket);
                Arc::new(client)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory media storage; uploads are lost on restart");
                Arc::new(MemoryStorageClient::new())
            }
        };

        match config.database.backend {
            DatabaseBackend::Mongo => {
                let client = mongodb::Client::with_uri_str(&config.database.mongodb_uri)
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to connect to MongoDB: {e}")))?;
                let db = client.database(&config.database.mongodb_database);
                let state = Self::with_mongo(&db, storage_client).await?;
                tracing::info!("Connected to MongoDB at {}", config.database.mongodb_uri);
                Ok(state)
            }
            DatabaseBackend::Memory => {
                tracing::warn!("Using in-memory database; data is lost on restart");
                Ok(Self::with_store(Arc::new(MemoryStore::new()), storage_client))
            }
        }
    }
}
