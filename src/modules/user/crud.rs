use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::error;
use crate::modules::user::model::UserCourse;

pub const COLLECTION_NAME: &str = "users";

pub struct UserCrud {
    collection: Collection<Document>,
}

impl UserCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn exists(&self, id: &str) -> Result<bool, mongodb::error::Error> {
        let user = self
            .collection
            .find_one(doc! { "_id": id })
            .projection(doc! { "_id": 1 })
            .await?;
        Ok(user.is_some())
    }

    /// Every user with only `_id` and `courses` loaded.
    pub async fn find_all_courses(&self) -> Result<Vec<Document>, mongodb::error::Error> {
        let cursor = self
            .collection
            .find(doc! {})
            .projection(doc! { "_id": 1, "courses": 1 })
            .await?;

        cursor.try_collect().await
    }

    pub async fn set_courses(&self, id: &Bson, courses: &[UserCourse]) -> error::Result<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.clone() },
                doc! { "$set": { "courses": bson::to_bson(courses)? } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    pub async fn count(&self) -> Result<u64, mongodb::error::Error> {
        self.collection.count_documents(doc! {}).await
    }

    pub async fn delete_all(&self) -> Result<u64, mongodb::error::Error> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }
}
