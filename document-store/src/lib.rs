pub mod config;
pub mod cosmos;
pub mod error;
pub mod local;
pub mod memory;
pub mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::{DocumentStore, DocumentStores};
