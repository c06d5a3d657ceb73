use reqwest::StatusCode;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record has no `id` field")]
    MissingId,

    #[error("Invalid record id: {0}")]
    InvalidId(String),

    #[error("Missing store setting `{0}`")]
    MissingSetting(&'static str),

    #[error("Invalid store configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Invalid master key: {0}")]
    InvalidKey(String),

    #[error("Invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Request to the document store failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document store responded with {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to access local store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
}
