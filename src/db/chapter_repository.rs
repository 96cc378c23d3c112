use async_trait::async_trait;

use crate::db::models::Chapter;
use crate::db::sequence::MongoSequence;
use crate::error::AppError;

/// Repository trait for chapters, always looked up by their parent document.
#[async_trait]
pub trait ChapterRepository: Send + Sync {
    /// Persist a new chapter with a freshly assigned id.
    async fn insert(&self, chapter: Chapter) -> Result<Chapter, AppError>;

    /// Chapters of a document ordered by position (ties by id).
    async fn list_by_document(&self, document_id: i64) -> Result<Vec<Chapter>, AppError>;

    /// Replace every given chapter (matched by id).
    async fn save_all(&self, chapters: &[Chapter]) -> Result<(), AppError>;
}

/// MongoDB implementation of the ChapterRepository.
pub struct MongoChapterRepository {
    collection: mongodb::Collection<Chapter>,
    ids: MongoSequence,
}

impl MongoChapterRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("chapters"),
            ids: MongoSequence::new(db, "chapters"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        self.collection
            .create_indexes([
                IndexModel::builder().keys(doc! { "id": 1 }).build(),
                IndexModel::builder()
                    .keys(doc! { "documentId": 1, "position": 1 })
                    .build(),
            ])
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ChapterRepository for MongoChapterRepository {
    async fn insert(&self, mut chapter: Chapter) -> Result<Chapter, AppError> {
        chapter.id = self.ids.next_id().await?;

        self.collection
            .insert_one(&chapter)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(chapter)
    }

    async fn list_by_document(&self, document_id: i64) -> Result<Vec<Chapter>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "position": 1, "id": 1 })
            .build();

        self.collection
            .find(doc! { "documentId": document_id })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn save_all(&self, chapters: &[Chapter]) -> Result<(), AppError> {
        use mongodb::bson::doc;

        for chapter in chapters {
            self.collection
                .replace_one(doc! { "id": chapter.id }, chapter)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        Ok(())
    }
}
