use async_trait::async_trait;

use crate::db::models::Snippet;
use crate::db::sequence::MongoSequence;
use crate::error::AppError;

/// Repository trait for user snippets.
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Persist a new snippet with a freshly assigned id.
    async fn insert(&self, snippet: Snippet) -> Result<Snippet, AppError>;

    /// A user's snippets, newest (highest id) first.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Snippet>, AppError>;
}

/// MongoDB implementation of the SnippetRepository.
pub struct MongoSnippetRepository {
    collection: mongodb::Collection<Snippet>,
    ids: MongoSequence,
}

impl MongoSnippetRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("snippets"),
            ids: MongoSequence::new(db, "snippets"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        self.collection
            .create_index(IndexModel::builder().keys(doc! { "userId": 1, "id": -1 }).build())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SnippetRepository for MongoSnippetRepository {
    async fn insert(&self, mut snippet: Snippet) -> Result<Snippet, AppError> {
        snippet.id = self.ids.next_id().await?;

        self.collection
            .insert_one(&snippet)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(snippet)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Snippet>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder().sort(doc! { "id": -1 }).build();

        self.collection
            .find(doc! { "userId": user_id })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
