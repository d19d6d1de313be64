//! Environment-driven connection settings.

use dinestore_core::error::{DocumentStoreError, DocumentStoreResult};

use crate::store::MongoDbStoreBuilder;

/// Environment variable holding the MongoDB connection string.
pub const CONNECTION_ENV: &str = "mongoConn";

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "recreation";

/// Connection string and database name for a [`MongoDbStore`](crate::MongoDbStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoDbConfig {
    pub connection_string: String,
    pub database: String,
}

impl MongoDbConfig {
    pub fn new(connection_string: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            database: database.into(),
        }
    }

    /// Reads the connection string from [`CONNECTION_ENV`] and uses [`DEFAULT_DATABASE`].
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Initialization`] if the variable is unset or blank.
    pub fn from_env() -> DocumentStoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DocumentStoreResult<Self> {
        tracing::info!(variable = CONNECTION_ENV, "Retrieving MongoDB connection string from environment");

        match lookup(CONNECTION_ENV) {
            Some(dsn) if !dsn.trim().is_empty() => Ok(Self::new(dsn, DEFAULT_DATABASE)),
            _ => Err(DocumentStoreError::Initialization(format!(
                "environment variable {CONNECTION_ENV} is not set"
            ))),
        }
    }

    /// Overrides the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn builder(&self) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(&self.connection_string, &self.database)
    }
}

impl From<MongoDbConfig> for MongoDbStoreBuilder {
    fn from(config: MongoDbConfig) -> Self {
        config.builder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_connection_string_and_defaults_database() {
        let config = MongoDbConfig::from_lookup(|key| {
            (key == "mongoConn").then(|| "mongodb://localhost:27017".to_string())
        })
        .unwrap();

        assert_eq!(config.connection_string, "mongodb://localhost:27017");
        assert_eq!(config.database, "recreation");
    }

    #[test]
    fn missing_or_blank_variable_is_an_initialization_error() {
        assert!(matches!(
            MongoDbConfig::from_lookup(|_| None),
            Err(DocumentStoreError::Initialization(_))
        ));
        assert!(matches!(
            MongoDbConfig::from_lookup(|_| Some("  ".into())),
            Err(DocumentStoreError::Initialization(_))
        ));
    }

    #[test]
    fn upper_case_variable_name_is_not_read() {
        let result = MongoDbConfig::from_lookup(|key| {
            (key == "MONGO_CONN").then(|| "mongodb://localhost:27017".to_string())
        });

        assert!(matches!(result, Err(DocumentStoreError::Initialization(_))));
    }

    #[test]
    fn database_can_be_overridden() {
        let config = MongoDbConfig::new("mongodb://db", "recreation").with_database("staging");

        assert_eq!(config.database, "staging");
    }
}
