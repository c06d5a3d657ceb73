use std::fmt::{self, Debug, Formatter};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Request, Response, StatusCode};
use serde_json::{json, Value};
use sha2::Sha256;
use url::{form_urlencoded, Url};
use validator::Validate;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::store::{validate_id, DocumentStore};

type HmacSha256 = Hmac<Sha256>;

const API_VERSION: &str = "2018-12-31";

/// Formats a timestamp the way the `x-ms-date` header expects it (RFC 1123).
pub fn rfc1123_now() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// A `DocumentStore` backed by one Cosmos DB container, spoken to over the REST API.
#[derive(Clone)]
pub struct CosmosDocumentStore {
    client: Client,
    endpoint: Url,
    key: Vec<u8>,
    database: String,
    container: String,
    partition_key: Vec<String>,
}

impl CosmosDocumentStore {
    /// Builds a client for the configured container. Fails if the endpoint or
    /// key is missing or malformed; no request is sent.
    pub fn new(client: Client, config: &StoreConfig) -> StoreResult<Self> {
        let endpoint = config.require_endpoint()?;
        let key = config.require_key()?;
        config.validate()?;

        let mut endpoint = Url::parse(endpoint)?;
        // Relative joins replace the last path segment unless it ends in `/`.
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        let key = STANDARD
            .decode(key)
            .map_err(|e| StoreError::InvalidKey(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            key,
            database: config.database.clone(),
            container: config.container.clone(),
            partition_key: config.partition_key_segments(),
        })
    }

    fn collection_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }

    /// Master-key authorization token for a single request.
    fn authorization(
        &self,
        verb: &Method,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> StoreResult<String> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.as_str().to_lowercase(),
            resource_type.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| StoreError::InvalidKey(e.to_string()))?;
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());
        let token = format!("type=master&ver=1.0&sig={}", signature);
        Ok(form_urlencoded::byte_serialize(token.as_bytes()).collect())
    }

    /// The partition key header value for a document, `[{}]` when the
    /// document has no value at the partition key path.
    fn partition_key_of(&self, item: &Value) -> Value {
        let mut current = item;
        for segment in &self.partition_key {
            match current.get(segment) {
                Some(value) => current = value,
                None => return json!([{}]),
            }
        }
        json!([current])
    }

    fn upsert_request(&self, item: &Value, date: &str) -> StoreResult<Request> {
        let link = self.collection_link();
        let url = self.endpoint.join(&format!("{}/docs", link))?;
        let auth = self.authorization(&Method::POST, "docs", &link, date)?;
        let partition_key = serde_json::to_string(&self.partition_key_of(item))?;

        let request = self
            .client
            .post(url)
            .header(AUTHORIZATION, auth)
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION)
            .header("x-ms-documentdb-is-upsert", "True")
            .header("x-ms-documentdb-partitionkey", partition_key)
            .json(item)
            .build()?;
        Ok(request)
    }

    fn read_request(&self, id: &str, date: &str) -> StoreResult<Request> {
        let link = format!("{}/docs/{}", self.collection_link(), id);
        let url = self.endpoint.join(&link)?;
        let auth = self.authorization(&Method::GET, "docs", &link, date)?;

        let mut builder = self
            .client
            .get(url)
            .header(AUTHORIZATION, auth)
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION);
        // A point read needs the partition key; it is only derivable from the id
        // when the container is partitioned on `/id`.
        if self.partition_key == ["id"] {
            builder = builder.header("x-ms-documentdb-partitionkey", json!([id]).to_string());
        }
        Ok(builder.build()?)
    }
}

async fn status_error(response: Response) -> StoreError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    StoreError::Status { status, message }
}

#[async_trait]
impl DocumentStore for CosmosDocumentStore {
    async fn upsert_item(&self, item: &Value) -> StoreResult<()> {
        let request = self.upsert_request(item, &rfc1123_now())?;
        tracing::debug!(url = %request.url(), "upserting document");
        let response = self.client.execute(request).await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }

    async fn read_item(&self, id: &str) -> StoreResult<Option<Value>> {
        validate_id(id)?;
        let request = self.read_request(id, &rfc1123_now())?;
        let response = self.client.execute(request).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(status_error(response).await),
        }
    }
}

impl Debug for CosmosDocumentStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmosDocumentStore")
            .field("endpoint", &self.endpoint.as_str())
            .field("database", &self.database)
            .field("container", &self.container)
            .field("partition_key", &self.partition_key)
            .finish()
    }
}
