use document_store::cosmos::CosmosDocumentStore;
use document_store::{DocumentStore, DocumentStores, StoreConfig, StoreResult};

/// Produces a document store client for one invocation.
pub trait StoreConnector: Send + Sync {
    fn connect(&self, config: &StoreConfig) -> StoreResult<Box<dyn DocumentStore>>;
}

/// Builds a fresh Cosmos DB client from the config on every call.
#[derive(Clone, Debug, Default)]
pub struct CosmosConnector {
    client: reqwest::Client,
}

impl CosmosConnector {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl StoreConnector for CosmosConnector {
    fn connect(&self, config: &StoreConfig) -> StoreResult<Box<dyn DocumentStore>> {
        let store = CosmosDocumentStore::new(self.client.clone(), config)?;
        Ok(Box::new(store))
    }
}

/// Hands out an already configured store, ignoring the config. Used for the
/// memory and local backends.
#[derive(Clone, Debug)]
pub struct SharedStoreConnector {
    store: DocumentStores,
}

impl SharedStoreConnector {
    pub fn new(store: DocumentStores) -> Self {
        Self { store }
    }
}

impl StoreConnector for SharedStoreConnector {
    fn connect(&self, _config: &StoreConfig) -> StoreResult<Box<dyn DocumentStore>> {
        Ok(Box::new(self.store.clone()))
    }
}
