use mongodb::{Client, Database};
use std::env;
use validator::Validate;

use crate::error::{MaintenanceError, Result};

const DEFAULT_DATABASE: &str = "test";

#[derive(Debug, Clone, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1, message = "MongoDB URI cannot be empty"))]
    pub uri: String,
    // MongoDB caps database names at 64 bytes
    #[validate(length(min = 1, max = 63, message = "Database name must be 1-63 characters"))]
    pub name: String,
}

impl DatabaseConfig {
    pub fn new(uri: impl Into<String>, name: Option<String>) -> Result<Self> {
        let config = Self {
            uri: uri.into(),
            name: name.unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        };

        config
            .validate()
            .map_err(|e| MaintenanceError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        let uri = env::var("MONGODB_URI")
            .map_err(|_| MaintenanceError::Config("MONGODB_URI must be set".to_string()))?;
        let name = env::var("MONGODB_DATABASE").ok();

        Self::new(uri, name)
    }

    /// Same server, different database.
    pub fn with_database(self, name: impl Into<String>) -> Result<Self> {
        Self::new(self.uri, Some(name.into()))
    }
}

pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let client = Client::with_uri_str(&config.uri).await?;

    Ok(client.database(&config.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_database_name() {
        let config = DatabaseConfig::new("mongodb://localhost:27017", None).unwrap();
        assert_eq!(config.name, "test");
    }

    #[test]
    fn test_rejects_empty_uri() {
        let err = DatabaseConfig::new("", None).unwrap_err();
        assert!(matches!(err, MaintenanceError::Config(_)));
    }

    #[test]
    fn test_with_database_keeps_uri() {
        let config = DatabaseConfig::new("mongodb://localhost:27017", None)
            .unwrap()
            .with_database("scratch")
            .unwrap();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.name, "scratch");
        assert!(DatabaseConfig::new("mongodb://localhost:27017", None)
            .unwrap()
            .with_database("")
            .is_err());
    }

    #[test]
    fn test_rejects_overlong_database_name() {
        let name = "d".repeat(64);
        assert!(DatabaseConfig::new("mongodb://localhost:27017", Some(name)).is_err());
    }
}
