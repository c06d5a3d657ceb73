use std::str::Utf8Error;

use document_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Blob is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("Blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to decode blob: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to construct document store client: {0}")]
    Connect(#[source] StoreError),

    #[error("Failed to write record #{index}: {source}")]
    StoreWrite {
        index: usize,
        id: Option<String>,
        #[source]
        source: StoreError,
    },
}
