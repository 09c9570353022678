use bson::Document;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::modules::fields;
use crate::modules::task::model::TaskType;

const COLLECTION: &str = "courses";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectTopic {
    pub name: String,
    pub id: String,
    pub active: bool,
    pub task_types: Vec<TaskType>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub topics: Vec<SubjectTopic>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Subject {
    /// Builds a catalogue subject from one embedded in a legacy course.
    pub fn from_course_subject(doc: &Document, now: bson::DateTime) -> Result<Self> {
        let topics = fields::documents(doc, "topics", COLLECTION)?
            .into_iter()
            .map(|topic| {
                Ok(SubjectTopic {
                    name: fields::string(topic, "name", COLLECTION)?,
                    id: fields::string_id(topic, COLLECTION)?,
                    active: true,
                    task_types: TaskType::all(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: fields::string_id(doc, COLLECTION)?,
            name: fields::string(doc, "name", COLLECTION)?,
            topics,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_copies_names_and_ids() {
        let now = bson::DateTime::from_millis(1_700_000_000_000);
        let legacy = doc! {
            "_id": "s1",
            "name": "Administrative Law",
            "relevance": 1,
            "topics": [{ "_id": "t1", "name": "Acts", "relevance": 2 }],
        };

        let subject = Subject::from_course_subject(&legacy, now).unwrap();

        assert_eq!(subject.id, "s1");
        assert_eq!(subject.name, "Administrative Law");
        assert_eq!(subject.created_at, now);
        assert_eq!(
            subject.topics,
            vec![SubjectTopic {
                name: "Acts".to_string(),
                id: "t1".to_string(),
                active: true,
                task_types: TaskType::all(),
            }]
        );
    }

    #[test]
    fn test_stored_shape() {
        let now = bson::DateTime::from_millis(0);
        let legacy = doc! { "_id": "s1", "name": "Ethics", "topics": [] };
        let subject = Subject::from_course_subject(&legacy, now).unwrap();
        let stored = bson::to_document(&subject).unwrap();

        assert_eq!(
            stored,
            doc! { "_id": "s1", "name": "Ethics", "topics": [], "createdAt": now, "updatedAt": now }
        );
    }

    #[test]
    fn test_migrated_course_subject_is_rejected() {
        // names are gone once the course itself has been migrated
        let migrated = doc! { "id": "s1", "relevance": 1.0, "active": true, "topics": [] };
        assert!(Subject::from_course_subject(&migrated, bson::DateTime::now()).is_err());
    }
}
