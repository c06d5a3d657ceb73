pub mod connector;
pub mod errors;
pub mod event;
pub mod handler;
pub mod log;
pub mod record;

pub use connector::{CosmosConnector, SharedStoreConnector, StoreConnector};
pub use errors::{DecodeError, IngestError};
pub use event::TriggerEvent;
pub use handler::{BlobIngestHandler, IngestSummary};
pub use log::InvocationLog;
pub use record::RecordBatch;
