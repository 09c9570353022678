use serde::Serialize;

use crate::modules::{subject_status, task, task_note, user};

/// A collection that can be wiped wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeTarget {
    Users,
    Tasks,
    TaskNotes,
    SubjectStatus,
}

impl WipeTarget {
    /// Order used by a full reset.
    pub const ALL: [WipeTarget; 4] = [
        WipeTarget::Users,
        WipeTarget::Tasks,
        WipeTarget::TaskNotes,
        WipeTarget::SubjectStatus,
    ];

    pub fn collection(self) -> &'static str {
        match self {
            WipeTarget::Users => user::crud::COLLECTION_NAME,
            WipeTarget::Tasks => task::crud::COLLECTION_NAME,
            WipeTarget::TaskNotes => task_note::crud::COLLECTION_NAME,
            WipeTarget::SubjectStatus => subject_status::crud::COLLECTION_NAME,
        }
    }
}

#[derive(Debug, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResetReport {
    pub user_id: String,
    pub found: bool,
    pub task_notes_deleted: u64,
    pub tasks_deleted: u64,
    pub subject_status_deleted: u64,
    pub dry_run: bool,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WipeReport {
    pub collection: &'static str,
    pub deleted: u64,
    pub dry_run: bool,
}
