use bson::{doc, Document};
use mongodb::{Collection, Database};

use crate::error;
use crate::modules::course::model::CourseSubject;

pub const COLLECTION_NAME: &str = "courses";

pub struct CourseCrud {
    collection: Collection<Document>,
}

impl CourseCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Document>, mongodb::error::Error> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    pub async fn set_subjects(&self, id: &str, subjects: &[CourseSubject]) -> error::Result<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "subjects": bson::to_bson(subjects)? } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }
}
