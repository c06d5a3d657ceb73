mod errors;
mod invocation;
mod params;
mod services;

use std::sync::Arc;

use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use blob_ingest::{BlobIngestHandler, CosmosConnector, SharedStoreConnector, StoreConnector};
use clap::Parser;
use document_store::local::LocalDocumentStore;
use document_store::memory::MemoryDocumentStore;
use document_store::DocumentStores;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::params::{Args, StoreBackend};
use crate::services::ingest_service::{invoke_function, IngestState, APP_TYPE_JSON};

#[derive(Serialize, Deserialize)]
struct Hello {}

#[get("/hello")]
async fn hello() -> impl Responder {
    HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(Hello {})
}

fn connector_for(args: &Args) -> Arc<dyn StoreConnector> {
    match args.store {
        StoreBackend::Cosmos => Arc::new(CosmosConnector::default()),
        StoreBackend::Memory => Arc::new(SharedStoreConnector::new(DocumentStores::Memory(
            MemoryDocumentStore::new(),
        ))),
        StoreBackend::Local => {
            let store = LocalDocumentStore::new(&args.data_dir, &args.store_config());
            tracing::info!("Writing documents under {}", store.directory().display());
            Arc::new(SharedStoreConnector::new(DocumentStores::Local(store)))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = args.store_config();
    if args.store == StoreBackend::Cosmos && config.endpoint.is_none() {
        // Not fatal: every invocation will fail at client construction instead.
        tracing::warn!("COSMOSDB_ENDPOINT is not set");
    }
    tracing::info!("Store: {:?} {:?}", args.store, config);

    let state = web::Data::new(IngestState {
        handler: BlobIngestHandler::new(config, connector_for(&args)),
        function_name: args.function_name.clone(),
        blob_binding: args.blob_binding.clone(),
        blob_encoding: args.blob_encoding,
    });
    let payload_config = web::PayloadConfig::new(args.max_payload_bytes);

    tracing::info!(
        "Serving function {} on {}:{}",
        args.function_name,
        args.host,
        args.port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(payload_config.clone())
            .service(hello)
            .service(invoke_function)
    })
    .bind((args.host.clone(), args.port))?
    .run()
    .await
}
