use async_trait::async_trait;
use serde_json::Value;

use crate::cosmos::CosmosDocumentStore;
use crate::error::{StoreError, StoreResult};
use crate::local::LocalDocumentStore;
use crate::memory::MemoryDocumentStore;

/// A collection of JSON documents addressed by their `id` field.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts the document, or fully replaces the one sharing its id.
    async fn upsert_item(&self, item: &Value) -> StoreResult<()>;

    /// Point read by id. `None` when no such document exists.
    async fn read_item(&self, id: &str) -> StoreResult<Option<Value>>;
}

/// Extracts and checks the `id` of a document.
pub fn document_id(item: &Value) -> StoreResult<&str> {
    match item.get("id") {
        None | Some(Value::Null) => Err(StoreError::MissingId),
        Some(Value::String(id)) => {
            validate_id(id)?;
            Ok(id)
        }
        Some(other) => Err(StoreError::InvalidId(other.to_string())),
    }
}

/// Ids must be non-empty and free of `/`, `\`, `?` and `#`.
pub fn validate_id(id: &str) -> StoreResult<()> {
    if id.is_empty() || id.contains(['/', '\\', '?', '#']) {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub enum DocumentStores {
    Cosmos(CosmosDocumentStore),
    Memory(MemoryDocumentStore),
    Local(LocalDocumentStore),
}

impl DocumentStores {
    /// Returns a reference to the inner value as a trait object.
    pub fn as_trait(&self) -> &dyn DocumentStore {
        match self {
            DocumentStores::Cosmos(a) => a,
            DocumentStores::Memory(b) => b,
            DocumentStores::Local(c) => c,
        }
    }
}

#[async_trait]
impl DocumentStore for DocumentStores {
    async fn upsert_item(&self, item: &Value) -> StoreResult<()> {
        self.as_trait().upsert_item(item).await
    }

    async fn read_item(&self, id: &str) -> StoreResult<Option<Value>> {
        self.as_trait().read_item(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_id() {
        assert_eq!(document_id(&json!({"id": "a1"})).unwrap(), "a1");
        assert!(matches!(document_id(&json!({"value": 1})), Err(StoreError::MissingId)));
        assert!(matches!(document_id(&json!({"id": null})), Err(StoreError::MissingId)));
        assert!(matches!(document_id(&json!({"id": 7})), Err(StoreError::InvalidId(_))));
        assert!(matches!(document_id(&json!({"id": "a/b"})), Err(StoreError::InvalidId(_))));
        assert!(matches!(document_id(&json!({"id": ""})), Err(StoreError::InvalidId(_))));
        assert!(matches!(document_id(&json!("plain string")), Err(StoreError::MissingId)));
    }
}
