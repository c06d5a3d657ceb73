use std::sync::Arc;

use document_store::StoreConfig;
use serde::Serialize;
use serde_json::Value;

use crate::connector::StoreConnector;
use crate::errors::IngestError;
use crate::event::TriggerEvent;
use crate::log::InvocationLog;
use crate::record::RecordBatch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub blob_name: String,
    pub records_written: usize,
}

/// Decodes a newly written blob and upserts its records into the document store.
///
/// Stateless between invocations: the store client is built per call from the
/// injected config.
pub struct BlobIngestHandler {
    config: StoreConfig,
    connector: Arc<dyn StoreConnector>,
}

impl BlobIngestHandler {
    pub fn new(config: StoreConfig, connector: Arc<dyn StoreConnector>) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Processes one blob. Failures are logged and returned to the caller
    /// untouched; records written before a failure stay written.
    pub async fn handle(
        &self,
        event: &TriggerEvent<'_>,
        log: &mut InvocationLog,
    ) -> Result<IngestSummary, IngestError> {
        log.info(format!("Processing blob: {}", event.name));
        match self.ingest(event).await {
            Ok(summary) => {
                log.info(format!(
                    "Saved {} record(s) to {}/{}",
                    summary.records_written, self.config.database, self.config.container
                ));
                Ok(summary)
            }
            Err(e) => {
                log.error(format!("Error processing blob {}: {}", event.name, e));
                Err(e)
            }
        }
    }

    async fn ingest(&self, event: &TriggerEvent<'_>) -> Result<IngestSummary, IngestError> {
        let batch = RecordBatch::decode(event.bytes)?;
        let store = self
            .connector
            .connect(&self.config)
            .map_err(IngestError::Connect)?;

        // Sequential, in input order; the first failure ends the invocation.
        for (index, record) in batch.iter().enumerate() {
            store
                .upsert_item(record)
                .await
                .map_err(|source| IngestError::StoreWrite {
                    index,
                    id: record_id(record),
                    source,
                })?;
            tracing::debug!(blob = event.name, index, "record upserted");
        }

        Ok(IngestSummary {
            blob_name: event.name.to_string(),
            records_written: batch.len(),
        })
    }
}

fn record_id(record: &Value) -> Option<String> {
    record.get("id").map(|id| match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
