use async_trait::async_trait;

use crate::db::models::Section;
use crate::db::sequence::MongoSequence;
use crate::error::AppError;

/// Repository trait for chapter sections.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Persist a new section with a freshly assigned id.
    async fn insert(&self, section: Section) -> Result<Section, AppError>;

    /// Sections of a chapter ordered by position (ties by id).
    async fn list_by_chapter(&self, chapter_id: i64) -> Result<Vec<Section>, AppError>;
}

/// MongoDB implementation of the SectionRepository.
pub struct MongoSectionRepository {
    collection: mongodb::Collection<Section>,
    ids: MongoSequence,
}

impl MongoSectionRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("sections"),
            ids: MongoSequence::new(db, "sections"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "chapterId": 1, "position": 1 })
                    .build(),
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SectionRepository for MongoSectionRepository {
    async fn insert(&self, mut section: Section) -> Result<Section, AppError> {
        section.id = self.ids.next_id().await?;

        self.collection
            .insert_one(&section)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(section)
    }

    async fn list_by_chapter(&self, chapter_id: i64) -> Result<Vec<Section>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "position": 1, "id": 1 })
            .build();

        self.collection
            .find(doc! { "chapterId": chapter_id })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
