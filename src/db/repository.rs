use async_trait::async_trait;

use crate::db::models::Document;
use crate::db::sequence::MongoSequence;
use crate::error::AppError;

/// Optional narrowing of a user's document list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFilter {
    All,
    /// Case-insensitive substring of the title.
    TitleContains(String),
    /// Case-insensitive substring of the free-text tags field.
    TagsContains(String),
}

/// Repository trait for document operations.
///
/// This trait allows swapping the database layer in tests.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persist a new document. The `id` of the argument is ignored and a
    /// fresh one is assigned; the stored record is returned.
    async fn insert(&self, doc: Document) -> Result<Document, AppError>;

    /// Find a document by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Document>, AppError>;

    /// Replace an existing document (matched by id).
    async fn save(&self, doc: &Document) -> Result<(), AppError>;

    /// Delete a document. Returns `false` when nothing matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// List a user's documents, optionally narrowed by `filter`.
    async fn list_by_user(
        &self,
        user_id: i64,
        filter: &DocumentFilter,
    ) -> Result<Vec<Document>, AppError>;

    /// All documents published to the blog, most recently published first.
    async fn list_published(&self) -> Result<Vec<Document>, AppError>;

    /// Find a published document by its blog slug.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Document>, AppError>;

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// MongoDB implementation of the DocumentRepository.
pub struct MongoDocumentRepository {
    collection: mongodb::Collection<Document>,
    ids: MongoSequence,
}

impl MongoDocumentRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("documents"),
            ids: MongoSequence::new(db, "documents"),
        }
    }

    /// Create the indexes backing id lookups, owner listings and slug lookups.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder().keys(doc! { "userId": 1 }).build(),
            IndexModel::builder().keys(doc! { "writeItSlug": 1 }).build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for MongoDocumentRepository {
    async fn insert(&self, mut doc: Document) -> Result<Document, AppError> {
        doc.id = self.ids.next_id().await?;

        self.collection
            .insert_one(&doc)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(doc)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Document>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn save(&self, doc: &Document) -> Result<(), AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .replace_one(doc! { "id": doc.id }, doc)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::document_not_found(doc.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .delete_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        filter: &DocumentFilter,
    ) -> Result<Vec<Document>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let mut query = doc! { "userId": user_id };
        match filter {
            DocumentFilter::All => {}
            DocumentFilter::TitleContains(needle) => {
                query.insert("title", contains_ignore_case(needle));
            }
            DocumentFilter::TagsContains(needle) => {
                query.insert("tags", contains_ignore_case(needle));
            }
        }

        let options = FindOptions::builder().sort(doc! { "id": 1 }).build();

        self.collection
            .find(query)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_published(&self) -> Result<Vec<Document>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;

        let mut documents: Vec<Document> = self
            .collection
            .find(doc! { "publishedToWriteIt": true })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Timestamps are stored as RFC 3339 strings whose fractional part
        // varies in length, so order on the parsed values.
        documents.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(documents)
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Document>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "writeItSlug": slug, "publishedToWriteIt": true })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// `$regex` clause matching `needle` literally, ignoring case.
fn contains_ignore_case(needle: &str) -> mongodb::bson::Document {
    mongodb::bson::doc! { "$regex": regex::escape(needle), "$options": "i" }
}
