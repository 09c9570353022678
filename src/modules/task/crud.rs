use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

pub const COLLECTION_NAME: &str = "tasks";

pub struct TaskCrud {
    collection: Collection<Document>,
}

impl TaskCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    /// Ids are returned as stored so they can be fed back into `$in` filters.
    pub async fn ids_for_owner(&self, user_id: &str) -> Result<Vec<Bson>, mongodb::error::Error> {
        let cursor = self
            .collection
            .find(doc! { "ownerId": user_id })
            .projection(doc! { "_id": 1 })
            .await?;

        let tasks: Vec<Document> = cursor.try_collect().await?;
        Ok(tasks.into_iter().filter_map(|mut t| t.remove("_id")).collect())
    }

    pub async fn delete_by_ids(&self, ids: &[Bson]) -> Result<u64, mongodb::error::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn count(&self) -> Result<u64, mongodb::error::Error> {
        self.collection.count_documents(doc! {}).await
    }

    pub async fn delete_all(&self) -> Result<u64, mongodb::error::Error> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }
}
