pub mod course;
pub mod fields;
pub mod inspect;
pub mod migration;
pub mod reset;
pub mod subject;
pub mod subject_status;
pub mod task;
pub mod task_note;
pub mod user;
