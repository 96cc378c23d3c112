use async_trait::async_trait;

use crate::db::models::DocumentVersion;
use crate::db::sequence::MongoSequence;
use crate::error::AppError;

/// Repository trait for immutable document snapshots.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Persist a new version with a freshly assigned id.
    async fn insert(&self, version: DocumentVersion) -> Result<DocumentVersion, AppError>;

    /// Highest version number recorded for a document, if any.
    async fn latest_version_number(&self, document_id: i64) -> Result<Option<i32>, AppError>;

    /// Versions of a document, highest version number first.
    async fn list_by_document(&self, document_id: i64)
        -> Result<Vec<DocumentVersion>, AppError>;
}

/// MongoDB implementation of the VersionRepository.
pub struct MongoVersionRepository {
    collection: mongodb::Collection<DocumentVersion>,
    ids: MongoSequence,
}

impl MongoVersionRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("document_versions"),
            ids: MongoSequence::new(db, "document_versions"),
        }
    }

    /// Non-unique on purpose: concurrent snapshots of one document may both
    /// read the same maximum and store the same version number.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "documentId": 1, "versionNumber": -1 })
                    .build(),
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl VersionRepository for MongoVersionRepository {
    async fn insert(&self, mut version: DocumentVersion) -> Result<DocumentVersion, AppError> {
        version.id = self.ids.next_id().await?;

        self.collection
            .insert_one(&version)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(version)
    }

    async fn latest_version_number(&self, document_id: i64) -> Result<Option<i32>, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::FindOneOptions;

        let options = FindOneOptions::builder()
            .sort(doc! { "versionNumber": -1 })
            .build();

        let latest = self
            .collection
            .find_one(doc! { "documentId": document_id })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(latest.map(|v| v.version_number))
    }

    async fn list_by_document(
        &self,
        document_id: i64,
    ) -> Result<Vec<DocumentVersion>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "versionNumber": -1, "id": -1 })
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
}
