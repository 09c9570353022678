use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaintenanceError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid id '{0}'")]
    InvalidId(String),
    #[error("course {0} not found")]
    CourseNotFound(String),
    #[error("malformed document in {collection}: {reason}")]
    MalformedDocument {
        collection: &'static str,
        reason: String,
    },
    #[error("refusing to wipe {0} without confirmation")]
    ConfirmationRequired(&'static str),
}

impl MaintenanceError {
    pub fn malformed(collection: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            collection,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MaintenanceError>;
