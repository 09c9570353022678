use bson::{doc, Bson, Document};
use mongodb::{Collection, Database};

pub const COLLECTION_NAME: &str = "taskNotes";

pub struct TaskNoteCrud {
    collection: Collection<Document>,
}

impl TaskNoteCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    fn for_tasks(task_ids: &[Bson]) -> Document {
        doc! { "taskId": { "$in": task_ids.to_vec() } }
    }

    pub async fn count_for_tasks(&self, task_ids: &[Bson]) -> Result<u64, mongodb::error::Error> {
        if task_ids.is_empty() {
            return Ok(0);
        }
        self.collection.count_documents(Self::for_tasks(task_ids)).await
    }

    pub async fn delete_for_tasks(&self, task_ids: &[Bson]) -> Result<u64, mongodb::error::Error> {
        if task_ids.is_empty() {
            return Ok(0);
        }
        let result = self.collection.delete_many(Self::for_tasks(task_ids)).await?;
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
