use actix_web::{HttpResponse, ResponseError};
use blob_ingest::IngestError;
use serde_json::error::Error as SerdeError;
use thiserror::Error;

use crate::invocation::InvocationResponse;
use crate::services::ingest_service::APP_TYPE_JSON;

#[derive(Debug, Error)]
pub enum InvokeErr {
    #[error("Failed to parse invocation request: {0}")]
    Json(#[from] SerdeError),

    #[error("Invocation request has no `{0}` input binding")]
    MissingBinding(String),

    #[error("Blob binding is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("No function named `{0}`")]
    UnknownFunction(String),

    #[error("Invocation failed: {source}")]
    Ingest {
        source: IngestError,
        logs: Vec<String>,
    },
}

impl ResponseError for InvokeErr {
    fn error_response(&self) -> HttpResponse {
        match self {
            InvokeErr::Json(_) => HttpResponse::BadRequest().body(self.to_string()),
            InvokeErr::MissingBinding(_) => HttpResponse::BadRequest().body(self.to_string()),
            InvokeErr::Base64(_) => HttpResponse::BadRequest().body(self.to_string()),
            InvokeErr::UnknownFunction(_) => HttpResponse::NotFound().body(self.to_string()),
            // The host records a failed execution; the logs travel with it.
            InvokeErr::Ingest { logs, .. } => HttpResponse::InternalServerError()
                .content_type(APP_TYPE_JSON)
                .json(InvocationResponse::from_logs(logs.clone())),
        }
    }
}
