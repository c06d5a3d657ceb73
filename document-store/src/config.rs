use std::env;
use std::fmt::{self, Debug, Formatter};

use validator::Validate;

use crate::error::{StoreError, StoreResult};

pub const ENDPOINT_VAR: &str = "COSMOSDB_ENDPOINT";
pub const KEY_VAR: &str = "COSMOSDB_KEY";

pub const DEFAULT_DATABASE: &str = "pipeline-db";
pub const DEFAULT_CONTAINER: &str = "data";
pub const DEFAULT_PARTITION_KEY_PATH: &str = "/id";

/// Connection parameters for the document store.
///
/// Endpoint and key are optional here so a missing setting only surfaces when a
/// client is actually constructed from the config.
#[derive(Clone, Validate)]
pub struct StoreConfig {
    #[validate(url)]
    pub endpoint: Option<String>,
    #[validate(length(min = 1))]
    pub key: Option<String>,
    #[validate(length(min = 1))]
    pub database: String,
    #[validate(length(min = 1))]
    pub container: String,
    #[validate(length(min = 2))]
    pub partition_key_path: String,
}

impl StoreConfig {
    pub fn new(endpoint: Option<String>, key: Option<String>) -> Self {
        Self {
            endpoint,
            key,
            database: DEFAULT_DATABASE.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            partition_key_path: DEFAULT_PARTITION_KEY_PATH.to_string(),
        }
    }

    /// Reads `COSMOSDB_ENDPOINT` and `COSMOSDB_KEY` from the process environment.
    pub fn from_env() -> Self {
        Self::new(env::var(ENDPOINT_VAR).ok(), env::var(KEY_VAR).ok())
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    pub fn with_partition_key_path(mut self, path: impl Into<String>) -> Self {
        self.partition_key_path = path.into();
        self
    }

    pub(crate) fn require_endpoint(&self) -> StoreResult<&str> {
        self.endpoint
            .as_deref()
            .ok_or(StoreError::MissingSetting(ENDPOINT_VAR))
    }

    pub(crate) fn require_key(&self) -> StoreResult<&str> {
        self.key.as_deref().ok_or(StoreError::MissingSetting(KEY_VAR))
    }

    /// Splits a partition key path such as `/tenant/id` into its segments.
    pub fn partition_key_segments(&self) -> Vec<String> {
        self.partition_key_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Debug for StoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("container", &self.container)
            .field("partition_key_path", &self.partition_key_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_pipeline_db() {
        let config = StoreConfig::default();
        assert_eq!(config.database, "pipeline-db");
        assert_eq!(config.container, "data");
        assert_eq!(config.partition_key_segments(), vec!["id".to_string()]);
        assert!(config.require_endpoint().is_err());
        assert!(config.require_key().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_endpoint() {
        let config = StoreConfig::new(Some("not a url".to_string()), Some("a2V5".to_string()));
        assert!(config.validate().is_err());

        let config = StoreConfig::new(
            Some("https://account.documents.azure.com:443/".to_string()),
            Some("a2V5".to_string()),
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = StoreConfig::new(None, Some("super-secret".to_string()));
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_from_env() {
        env::set_var(ENDPOINT_VAR, "https://account.documents.azure.com:443/");
        env::set_var(KEY_VAR, "a2V5");
        let config = StoreConfig::from_env();
        env::remove_var(ENDPOINT_VAR);
        env::remove_var(KEY_VAR);

        assert_eq!(config.require_endpoint().unwrap(), "https://account.documents.azure.com:443/");
        assert_eq!(config.require_key().unwrap(), "a2V5");
    }

    #[test]
    fn test_nested_partition_key_path() {
        let config = StoreConfig::default().with_partition_key_path("/tenant/region");
        assert_eq!(config.partition_key_segments(), vec!["tenant", "region"]);
    }
}
