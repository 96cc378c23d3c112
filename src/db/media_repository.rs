use async_trait::async_trait;

use crate::db::models::MediaFile;
use crate::db::sequence::MongoSequence;
use crate::error::AppError;

/// Repository trait for media attachment metadata.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Persist a new media record with a freshly assigned id.
    async fn insert(&self, media: MediaFile) -> Result<MediaFile, AppError>;

    /// Media attached to a document, in insertion order.
    async fn list_by_document(&self, document_id: i64) -> Result<Vec<MediaFile>, AppError>;

    /// Find the record served under exactly this `url`.
    async fn find_by_url(&self, url: &str) -> Result<Option<MediaFile>, AppError>;
}

/// MongoDB implementation of the MediaRepository.
pub struct MongoMediaRepository {
    collection: mongodb::Collection<MediaFile>,
    ids: MongoSequence,
}

impl MongoMediaRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("media_files"),
            ids: MongoSequence::new(db, "media_files"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        self.collection
            .create_indexes([
                IndexModel::builder().keys(doc! { "documentId": 1, "id": 1 }).build(),
                IndexModel::builder().keys(doc! { "url": 1 }).build(),
            ])
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl MediaRepository for MongoMediaRepository {
    async fn insert(&self, mut media: MediaFile) -> Result<MediaFile, AppError> {
        media.id = self.ids.next_id().await?;

        self.collection
            .insert_one(&media)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(media)
    }

    async fn list_by_document(&self, document_id: i64) -> Result<Vec<MediaFile>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder().sort(doc! { "id": 1 }).build();

        self.collection
            .find(doc! { "documentId": document_id })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<MediaFile>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "url": url })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
