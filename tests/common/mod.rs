#![allow(dead_code)]

use studykeeper::config::database::{self, DatabaseConfig};
use studykeeper::AppState;

/// Connects to a throwaway database, or returns `None` when no MongoDB is
/// configured for the test run.
pub async fn setup_test_state(dry_run: bool) -> Option<AppState> {
    dotenvy::dotenv().ok();

    let name = format!("studykeeper_test_{}", uuid::Uuid::new_v4().simple());
    let config = DatabaseConfig::from_env().ok()?.with_database(name).ok()?;
    let db = database::connect(&config).await.ok()?;

    Some(AppState::new(db, dry_run))
}

pub async fn teardown(state: AppState) {
    let _ = state.db.drop().await;
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
