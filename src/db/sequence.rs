use mongodb::bson::{doc, Document as BsonDocument};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

use crate::error::AppError;

/// Sequential integer ids backed by the `counters` collection.
///
/// Each entity collection owns one counter document `{ _id: <name>, seq: <i64> }`
/// which is incremented atomically, so ids are unique across server instances.
#[derive(Clone)]
pub struct MongoSequence {
    collection: mongodb::Collection<BsonDocument>,
    name: String,
}

impl MongoSequence {
    pub fn new(db: &mongodb::Database, name: &str) -> Self {
        Self {
            collection: db.collection("counters"),
            name: name.to_string(),
        }
    }

    /// Reserve and return the next id (the first call returns 1).
    pub async fn next_id(&self) -> Result<i64, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .collection
            .find_one_and_update(doc! { "_id": &self.name }, doc! { "$inc": { "seq": 1_i64 } })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        counter
            .and_then(|c| c.get_i64("seq").ok())
            .ok_or_else(|| {
                AppError::Database(format!("Counter '{}' returned no sequence value", self.name))
            })
    }
}
