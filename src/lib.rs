use mongodb::Database;

pub mod config;
pub mod error;
pub mod modules;

pub use error::MaintenanceError;

/// Shared handle passed to every maintenance operation.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub dry_run: bool,
}

impl AppState {
    pub fn new(db: Database, dry_run: bool) -> Self {
        Self { db, dry_run }
    }
}
