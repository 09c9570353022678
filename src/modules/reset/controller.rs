use tracing::{info, warn};

use crate::error::{MaintenanceError, Result};
use crate::modules::fields;
use crate::modules::reset::schema::{UserResetReport, WipeReport, WipeTarget};
use crate::modules::subject_status::crud::SubjectStatusCrud;
use crate::modules::task::crud::TaskCrud;
use crate::modules::task_note::crud::TaskNoteCrud;
use crate::modules::user::crud::UserCrud;
use crate::AppState;

/// Removes a user's tasks, the notes on those tasks and the user's
/// subject-status records. The user document itself is kept.
///
/// Notes are deleted before their tasks, and tasks before status records,
/// so an interrupted run never leaves notes pointing at missing tasks.
pub async fn reset_user_by_id(state: &AppState, user_id: &str) -> Result<UserResetReport> {
    let user_id = fields::parse_uuid(user_id)?;
    let mut report = UserResetReport {
        user_id: user_id.clone(),
        dry_run: state.dry_run,
        ..Default::default()
    };

    if !UserCrud::new(&state.db).exists(&user_id).await? {
        warn!(user_id = %user_id, "User not found, nothing reset");
        return Ok(report);
    }
    report.found = true;

    let tasks = TaskCrud::new(&state.db);
    let notes = TaskNoteCrud::new(&state.db);
    let statuses = SubjectStatusCrud::new(&state.db);

    let task_ids = tasks.ids_for_owner(&user_id).await?;

    if state.dry_run {
        report.task_notes_deleted = notes.count_for_tasks(&task_ids).await?;
        report.tasks_deleted = task_ids.len() as u64;
        report.subject_status_deleted = statuses.count_for_user(&user_id).await?;
    } else {
        report.task_notes_deleted = notes.delete_for_tasks(&task_ids).await?;
        report.tasks_deleted = tasks.delete_by_ids(&task_ids).await?;
        report.subject_status_deleted = statuses.delete_for_user(&user_id).await?;
    }

    info!(
        user_id = %user_id,
        task_notes = report.task_notes_deleted,
        tasks = report.tasks_deleted,
        subject_status = report.subject_status_deleted,
        dry_run = state.dry_run,
        "User reset"
    );

    Ok(report)
}

/// Collection-wide wipes need explicit confirmation unless nothing will be
/// written.
pub fn require_confirmation(state: &AppState, confirmed: bool, what: &'static str) -> Result<()> {
    if confirmed || state.dry_run {
        Ok(())
    } else {
        Err(MaintenanceError::ConfirmationRequired(what))
    }
}

/// Deletes every document in one collection.
pub async fn wipe(state: &AppState, target: WipeTarget) -> Result<WipeReport> {
    let db = &state.db;
    let deleted = match (target, state.dry_run) {
        (WipeTarget::Users, false) => UserCrud::new(db).delete_all().await?,
        (WipeTarget::Users, true) => UserCrud::new(db).count().await?,
        (WipeTarget::Tasks, false) => TaskCrud::new(db).delete_all().await?,
        (WipeTarget::Tasks, true) => TaskCrud::new(db).count().await?,
        (WipeTarget::TaskNotes, false) => TaskNoteCrud::new(db).delete_all().await?,
        (WipeTarget::TaskNotes, true) => TaskNoteCrud::new(db).count().await?,
        (WipeTarget::SubjectStatus, false) => SubjectStatusCrud::new(db).delete_all().await?,
        (WipeTarget::SubjectStatus, true) => SubjectStatusCrud::new(db).count().await?,
    };

    info!(
        collection = target.collection(),
        deleted,
        dry_run = state.dry_run,
        "Collection wiped"
    );

    Ok(WipeReport {
        collection: target.collection(),
        deleted,
        dry_run: state.dry_run,
    })
}

pub async fn reset_users(state: &AppState) -> Result<WipeReport> {
    wipe(state, WipeTarget::Users).await
}

pub async fn reset_tasks(state: &AppState) -> Result<WipeReport> {
    wipe(state, WipeTarget::Tasks).await
}

pub async fn reset_task_notes(state: &AppState) -> Result<WipeReport> {
    wipe(state, WipeTarget::TaskNotes).await
}

pub async fn reset_user_subject_status(state: &AppState) -> Result<WipeReport> {
    wipe(state, WipeTarget::SubjectStatus).await
}

/// Wipes users, tasks, task notes and subject status, in that order.
pub async fn reset_all(state: &AppState) -> Result<Vec<WipeReport>> {
    let mut reports = Vec::with_capacity(WipeTarget::ALL.len());
    for target in WipeTarget::ALL {
        reports.push(wipe(state, target).await?);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;

    // Building a client does no I/O, so no server is needed.
    async fn state(dry_run: bool) -> AppState {
        let client = Client::with_uri_str("mongodb://localhost:27017").await.unwrap();
        AppState::new(client.database("studykeeper_unit"), dry_run)
    }

    #[tokio::test]
    async fn test_wipe_requires_confirmation() {
        let err = require_confirmation(&state(false).await, false, "users").unwrap_err();
        assert!(matches!(err, MaintenanceError::ConfirmationRequired("users")));
    }

    #[tokio::test]
    async fn test_confirmed_wipe_is_allowed() {
        assert!(require_confirmation(&state(false).await, true, "users").is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_needs_no_confirmation() {
        assert!(require_confirmation(&state(true).await, false, "all user data").is_ok());
    }
}
