use bson::Document;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::modules::fields;
use crate::modules::task::model::TaskType;

/// Course the legacy subject catalogue was embedded in.
pub const DEFAULT_COURSE_ID: &str = "4ad3db6f-5e0e-48e2-81ae-77997aaceb7f";

const COLLECTION: &str = "courses";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseTopic {
    pub id: String,
    pub active: bool,
    pub relevance: f64,
    pub task_types: Vec<TaskType>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseSubject {
    pub id: String,
    pub relevance: f64,
    pub topics: Vec<CourseTopic>,
    pub active: bool,
}

impl CourseTopic {
    pub fn from_legacy(doc: &Document) -> Result<Self> {
        Ok(Self {
            id: fields::string_id(doc, COLLECTION)?,
            active: doc.get_bool("active").unwrap_or(true),
            relevance: fields::number(doc, "relevance", COLLECTION)?,
            task_types: TaskType::all(),
        })
    }
}

impl CourseSubject {
    /// Accepts both the legacy `_id` shape and an already-migrated entry,
    /// so re-running the migration leaves the course unchanged.
    pub fn from_legacy(doc: &Document) -> Result<Self> {
        let topics = fields::documents(doc, "topics", COLLECTION)?
            .into_iter()
            .map(CourseTopic::from_legacy)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: fields::string_id(doc, COLLECTION)?,
            relevance: fields::number(doc, "relevance", COLLECTION)?,
            topics,
            active: doc.get_bool("active").unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_reshapes_legacy_subject() {
        let legacy = doc! {
            "_id": "s1",
            "name": "Constitutional Law",
            "relevance": 3,
            "topics": [
                { "_id": "t1", "name": "Rights", "relevance": 0.5 },
                { "_id": "t2", "name": "Powers", "relevance": 2_i64 },
            ],
        };

        let subject = CourseSubject::from_legacy(&legacy).unwrap();

        assert_eq!(subject.id, "s1");
        assert_eq!(subject.relevance, 3.0);
        assert!(subject.active);
        assert_eq!(subject.topics.len(), 2);
        assert_eq!(subject.topics[1].id, "t2");
        assert_eq!(subject.topics[1].relevance, 2.0);
        assert!(subject.topics.iter().all(|t| t.active && t.task_types == TaskType::all()));
    }

    #[test]
    fn test_reshape_is_stable_on_migrated_subject() {
        let migrated = CourseSubject {
            id: "s1".to_string(),
            relevance: 0.5,
            active: false,
            topics: vec![CourseTopic {
                id: "t1".to_string(),
                active: false,
                relevance: 1.0,
                task_types: TaskType::all(),
            }],
        };
        let stored = bson::to_document(&migrated).unwrap();

        assert_eq!(CourseSubject::from_legacy(&stored).unwrap(), migrated);
    }

    #[test]
    fn test_reshape_rejects_missing_relevance() {
        let legacy = doc! { "_id": "s1", "topics": [] };
        assert!(CourseSubject::from_legacy(&legacy).is_err());
    }
}
