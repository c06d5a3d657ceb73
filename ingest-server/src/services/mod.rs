pub mod ingest_service;
