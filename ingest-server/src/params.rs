use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use document_store::config::{DEFAULT_CONTAINER, DEFAULT_DATABASE, DEFAULT_PARTITION_KEY_PATH};
use document_store::StoreConfig;

/// Largest invocation request body accepted. Blobs arrive inline in the body.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    Cosmos,
    Memory,
    Local,
}

/// How the host encodes the blob binding inside the invocation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BlobEncoding {
    Text,
    Base64,
}

#[derive(Parser)]
pub struct Args {
    #[clap(long, default_value = "127.0.0.1")]
    pub(crate) host: String,
    #[clap(long, env = "FUNCTIONS_CUSTOMHANDLER_PORT", default_value_t = 8080)]
    pub(crate) port: u16,
    #[clap(long, default_value = "ProcessBlob")]
    pub(crate) function_name: String,
    #[clap(long, default_value = "inputBlob")]
    pub(crate) blob_binding: String,
    #[clap(long, value_enum, default_value_t = BlobEncoding::Text)]
    pub(crate) blob_encoding: BlobEncoding,
    #[clap(long, default_value_t = DEFAULT_MAX_PAYLOAD_BYTES)]
    pub(crate) max_payload_bytes: usize,
    #[clap(long, value_enum, default_value_t = StoreBackend::Cosmos)]
    pub(crate) store: StoreBackend,
    #[clap(long, default_value = "ingest-data")]
    pub(crate) data_dir: PathBuf,
    #[clap(long, env = "COSMOSDB_ENDPOINT")]
    pub(crate) cosmosdb_endpoint: Option<String>,
    #[clap(long, env = "COSMOSDB_KEY", hide_env_values = true)]
    pub(crate) cosmosdb_key: Option<String>,
    #[clap(long, default_value = DEFAULT_DATABASE)]
    pub(crate) database: String,
    #[clap(long, default_value = DEFAULT_CONTAINER)]
    pub(crate) container: String,
    #[clap(long, default_value = DEFAULT_PARTITION_KEY_PATH)]
    pub(crate) partition_key_path: String,
}

impl Args {
    pub(crate) fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.cosmosdb_endpoint.clone(), self.cosmosdb_key.clone())
            .with_database(self.database.clone())
            .with_container(self.container.clone())
            .with_partition_key_path(self.partition_key_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["ingest-server", "--port", "7071"]).unwrap();
        assert_eq!(args.port, 7071);
        assert_eq!(args.function_name, "ProcessBlob");
        assert_eq!(args.blob_binding, "inputBlob");
        assert_eq!(args.store, StoreBackend::Cosmos);
        assert_eq!(args.blob_encoding, BlobEncoding::Text);
        assert_eq!(args.max_payload_bytes, DEFAULT_MAX_PAYLOAD_BYTES);

        let config = args.store_config();
        assert_eq!(config.database, "pipeline-db");
        assert_eq!(config.container, "data");
    }

    #[test]
    fn test_local_store_flags() {
        let args = Args::try_parse_from([
            "ingest-server",
            "--store",
            "local",
            "--data-dir",
            "/tmp/ingest",
            "--blob-encoding",
            "base64",
            "--container",
            "events",
        ])
        .unwrap();
        assert_eq!(args.store, StoreBackend::Local);
        assert_eq!(args.blob_encoding, BlobEncoding::Base64);
        assert_eq!(args.data_dir, PathBuf::from("/tmp/ingest"));
        assert_eq!(args.store_config().container, "events");
    }
}
