use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::store::{document_id, validate_id, DocumentStore};

/// A `DocumentStore` that keeps one JSON file per document under a local directory.
#[derive(Clone, Debug)]
pub struct LocalDocumentStore {
    directory: PathBuf,
}

impl LocalDocumentStore {
    /// Creates a store rooted at `{base}/{database}/{container}`.
    pub fn new(base: impl AsRef<Path>, config: &StoreConfig) -> Self {
        Self {
            directory: base.as_ref().join(&config.database).join(&config.container),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.directory.join(format!("{}.json", id))
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn upsert_item(&self, item: &Value) -> StoreResult<()> {
        let id = document_id(item)?;
        fs::create_dir_all(&self.directory).await?;
        // Overwrites any existing document with the same id.
        fs::write(self.path_for(id), serde_json::to_vec_pretty(item)?).await?;
        Ok(())
    }

    async fn read_item(&self, id: &str) -> StoreResult<Option<Value>> {
        validate_id(id)?;
        match fs::read(self.path_for(id)).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use serde_json::json;
    use tempfile::tempdir;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_local_document_store() {
        let temp_dir = tempdir().unwrap();
        let store = LocalDocumentStore::new(temp_dir.path(), &StoreConfig::default());
        let id = Uuid::new_v4().to_string();

        store.upsert_item(&json!({"id": id, "value": 1})).await.unwrap();
        store.upsert_item(&json!({"id": id, "value": 2})).await.unwrap();

        let retrieved = store.read_item(&id).await.unwrap();
        assert_eq!(retrieved, Some(json!({"id": id, "value": 2})));
        assert!(store.directory().ends_with("pipeline-db/data"));
    }

    #[tokio::test]
    async fn test_missing_document_reads_none() {
        let temp_dir = tempdir().unwrap();
        let store = LocalDocumentStore::new(temp_dir.path(), &StoreConfig::default());
        assert_eq!(store.read_item("nothing-here").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let temp_dir = tempdir().unwrap();
        let store = LocalDocumentStore::new(temp_dir.path(), &StoreConfig::default());
        let err = store.upsert_item(&json!({"id": "../escape"})).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }
}
