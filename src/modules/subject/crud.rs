use std::collections::HashSet;

use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::modules::subject::model::Subject;

pub const COLLECTION_NAME: &str = "subjects";

pub struct SubjectCrud {
    collection: Collection<Subject>,
}

impl SubjectCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    /// Which of `ids` are already present in the catalogue.
    pub async fn existing_ids(
        &self,
        ids: &[String],
    ) -> Result<HashSet<String>, mongodb::error::Error> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .projection(doc! { "_id": 1 })
            .await?;

        let found: Vec<Document> = cursor.try_collect().await?;
        Ok(found
            .iter()
            .filter_map(|d| d.get_str("_id").ok().map(str::to_string))
            .collect())
    }

    pub async fn insert_many(
        &self,
        subjects: Vec<Subject>,
    ) -> Result<usize, mongodb::error::Error> {
        if subjects.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(subjects).await?;
        Ok(result.inserted_ids.len())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Subject>, mongodb::error::Error> {
        self.collection.find_one(doc! { "_id": id }).await
    }
}
