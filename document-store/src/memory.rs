use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::store::{document_id, validate_id, DocumentStore};

/// A `DocumentStore` held in process memory. Clones share the same documents.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocumentStore {
    state: Arc<RwLock<MemoryState>>,
}

/// Documents and the write history live under one lock, so the history order is
/// the order writes actually landed in.
#[derive(Debug, Default)]
struct MemoryState {
    items: BTreeMap<String, Value>,
    writes: Vec<(String, Value)>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.items.is_empty()
    }

    /// Ids of every successful write, in the order they happened.
    pub async fn write_log(&self) -> Vec<String> {
        let state = self.state.read().await;
        state.writes.iter().map(|(id, _)| id.clone()).collect()
    }

    /// Every successfully written document, in write order.
    pub async fn history(&self) -> Vec<Value> {
        let state = self.state.read().await;
        state.writes.iter().map(|(_, item)| item.clone()).collect()
    }

    pub async fn snapshot(&self) -> BTreeMap<String, Value> {
        self.state.read().await.items.clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn upsert_item(&self, item: &Value) -> StoreResult<()> {
        let id = document_id(item)?.to_string();
        let mut state = self.state.write().await;
        state.items.insert(id.clone(), item.clone());
        state.writes.push((id, item.clone()));
        Ok(())
    }

    async fn read_item(&self, id: &str) -> StoreResult<Option<Value>> {
        validate_id(id)?;
        Ok(self.state.read().await.items.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let store = MemoryDocumentStore::new();
        store.upsert_item(&json!({"id": "a1", "value": 1, "extra": true})).await.unwrap();
        store.upsert_item(&json!({"id": "a1", "value": 2})).await.unwrap();

        assert_eq!(store.len().await, 1);
        // Fully replaced, not merged.
        assert_eq!(store.read_item("a1").await.unwrap(), Some(json!({"id": "a1", "value": 2})));
        assert_eq!(store.write_log().await, vec!["a1", "a1"]);
    }

    #[tokio::test]
    async fn test_rejects_missing_id() {
        let store = MemoryDocumentStore::new();
        let err = store.upsert_item(&json!({"value": "missing-id"})).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingId));
        assert!(store.is_empty().await);
        assert!(store.write_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_documents() {
        let store = MemoryDocumentStore::new();
        let other = store.clone();
        other.upsert_item(&json!({"id": "shared"})).await.unwrap();
        assert_eq!(store.read_item("shared").await.unwrap(), Some(json!({"id": "shared"})));
        assert_eq!(store.read_item("absent").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_history_matches_final_state() {
        let store = MemoryDocumentStore::new();
        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.upsert_item(&json!({"id": "same", "value": i})).await.unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let history = store.history().await;
        assert_eq!(history.len(), 64);
        assert_eq!(history.last().cloned(), store.read_item("same").await.unwrap());
    }
}
