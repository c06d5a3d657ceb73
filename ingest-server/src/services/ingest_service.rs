use actix_web::{post, web, HttpRequest, HttpResponse};
use blob_ingest::{BlobIngestHandler, InvocationLog, TriggerEvent};
use tracing::Instrument;
use uuid::Uuid;

use crate::errors::InvokeErr;
use crate::invocation::{InvocationRequest, InvocationResponse};
use crate::params::BlobEncoding;

pub const APP_TYPE_JSON: &str = "application/json";
pub const INVOCATION_ID_HEADER: &str = "X-Azure-Functions-InvocationId";

pub struct IngestState {
    pub(crate) handler: BlobIngestHandler,
    pub(crate) function_name: String,
    pub(crate) blob_binding: String,
    pub(crate) blob_encoding: BlobEncoding,
}

/// Entry point the Functions host calls for every blob-trigger invocation.
#[post("/{function_name}")]
async fn invoke_function(
    function_name: web::Path<String>,
    request: HttpRequest,
    request_json_bytes: web::Bytes,
    shared_state: web::Data<IngestState>,
) -> Result<HttpResponse, InvokeErr> {
    let function_name = function_name.into_inner();
    if function_name != shared_state.function_name {
        return Err(InvokeErr::UnknownFunction(function_name));
    }

    let invocation_id = request
        .headers()
        .get(INVOCATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let span = tracing::info_span!("invocation", id = %invocation_id, function = %function_name);

    let invocation: InvocationRequest = serde_json::from_slice(&request_json_bytes)?;
    let blob = invocation.blob_bytes(&shared_state.blob_binding, shared_state.blob_encoding)?;
    let event = TriggerEvent::new(invocation.blob_name(), &blob);

    let mut log = InvocationLog::new();
    let result = shared_state
        .handler
        .handle(&event, &mut log)
        .instrument(span)
        .await;

    match result {
        Ok(summary) => {
            let mut resp = InvocationResponse::from_logs(log.into_lines());
            resp.return_value = serde_json::to_value(summary).ok();
            Ok(HttpResponse::Ok().content_type(APP_TYPE_JSON).json(resp))
        }
        Err(source) => Err(InvokeErr::Ingest {
            source,
            logs: log.into_lines(),
        }),
    }
}
