use bson::{doc, Bson, Document};
use mongodb::{Collection, Database};

pub const COLLECTION_NAME: &str = "userSubjectsStatus";

/// Per-subject arrays dropped when a record moves to the customization shape.
const LEGACY_FIELDS: [&str; 2] = ["subjects", "subjectCustomizations"];

pub struct SubjectStatusCrud {
    collection: Collection<Document>,
}

impl SubjectStatusCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn count_for_user(&self, user_id: &str) -> Result<u64, mongodb::error::Error> {
        self.collection.count_documents(doc! { "userId": user_id }).await
    }

    /// A user holds one record per enrolled course, so all of them go.
    pub async fn delete_for_user(&self, user_id: &str) -> Result<u64, mongodb::error::Error> {
        let result = self.collection.delete_many(doc! { "userId": user_id }).await?;
        Ok(result.deleted_count)
    }

    pub async fn count_for_course(&self, course_id: &str) -> Result<u64, mongodb::error::Error> {
        self.collection.count_documents(doc! { "courseId": course_id }).await
    }

    /// Clears progress and customizations for every record of a course and
    /// drops the legacy per-subject arrays. Returns (matched, modified).
    pub async fn reset_customizations(
        &self,
        course_id: &str,
    ) -> Result<(u64, u64), mongodb::error::Error> {
        let mut unset = Document::new();
        for field in LEGACY_FIELDS {
            unset.insert(field, "");
        }

        let result = self
            .collection
            .update_many(
                doc! { "courseId": course_id },
                doc! {
                    "$set": {
                        "hitsAndMisses": Vec::<Bson>::new(),
                        "customizations": Vec::<Bson>::new(),
                    },
                    "$unset": unset,
                },
            )
            .await?;

        Ok((result.matched_count, result.modified_count))
    }

    pub async fn count(&self) -> Result<u64, mongodb::error::Error> {
        self.collection.count_documents(doc! {}).await
    }

    pub async fn delete_all(&self) -> Result<u64, mongodb::error::Error> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }
}
