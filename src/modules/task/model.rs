use serde::{Deserialize, Serialize};

/// Kinds of study task a topic can schedule.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TaskType {
    Study,
    LawStudy,
    Exercise,
    Review,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        TaskType::Study,
        TaskType::LawStudy,
        TaskType::Exercise,
        TaskType::Review,
    ];

    pub fn all() -> Vec<TaskType> {
        Self::ALL.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_types_serialize_camel_case() {
        let value = bson::to_bson(&TaskType::all()).unwrap();
        assert_eq!(
            value,
            bson::bson!(["study", "lawStudy", "exercise", "review"])
        );
    }
}
