//! Remote Repository
//!
//! The seam between the synchronized collection and the REST data store.
//! Payloads cross it as raw JSON; shaping them is the normalizer's job.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{header, Client, RequestBuilder, Response};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{Operation, SyncError, SyncResult};

/// CRUD endpoints of the inventory store.
///
/// Futures are `Send` on native targets; in the browser `fetch` handles are
/// not, so the bound is dropped there.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RemoteRepository {
    /// `GET /categories`
    async fn list_categories(&self) -> SyncResult<Value>;

    /// `GET /inventories`
    async fn list_inventories(&self) -> SyncResult<Value>;

    /// `GET /inventories/{id}`
    async fn get_inventory(&self, id: &str) -> SyncResult<Value>;

    /// `POST /inventories`
    async fn create_inventory(&self, body: &Value) -> SyncResult<Value>;

    /// `PUT /inventories/{id}`
    async fn update_inventory(&self, id: &str, body: &Value) -> SyncResult<Value>;

    /// `DELETE /inventories/{id}`
    async fn delete_inventory(&self, id: &str) -> SyncResult<()>;
}

// Ids end up as a single path segment
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// [`RemoteRepository`] over HTTP(S) JSON
#[derive(Debug, Clone)]
pub struct RestRepository {
    config: ApiConfig,
    client: Client,
}

impl RestRepository {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Repository for the API baked in at build time
    pub fn from_build_env() -> SyncResult<Self> {
        Ok(Self::new(ApiConfig::from_build_env()?))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn item_url(&self, id: &str) -> String {
        let segment = utf8_percent_encode(id, PATH_SEGMENT_ENCODE_SET);
        self.config.endpoint(&format!("inventories/{}", segment))
    }

    /// Send a request; anything but a 2xx status is a failure.
    async fn send(&self, operation: &Operation, request: RequestBuilder) -> SyncResult<Response> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SyncError::network(operation.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::status(operation.clone(), status.as_u16()));
        }
        log::debug!("{} -> {}", operation, status);
        Ok(response)
    }

    async fn send_json(&self, operation: Operation, request: RequestBuilder) -> SyncResult<Value> {
        let response = self.send(&operation, request).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| SyncError::malformed(operation, e))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RemoteRepository for RestRepository {
    async fn list_categories(&self) -> SyncResult<Value> {
        let request = self.client.get(self.config.endpoint("categories"));
        self.send_json(Operation::LoadCategories, request).await
    }

    async fn list_inventories(&self) -> SyncResult<Value> {
        let request = self.client.get(self.config.endpoint("inventories"));
        self.send_json(Operation::LoadInventories, request).await
    }

    async fn get_inventory(&self, id: &str) -> SyncResult<Value> {
        let request = self.client.get(self.item_url(id));
        self.send_json(Operation::GetInventory(id.to_string()), request).await
    }

    async fn create_inventory(&self, body: &Value) -> SyncResult<Value> {
        let request = self.client.post(self.config.endpoint("inventories")).json(body);
        self.send_json(Operation::CreateInventory, request).await
    }

    async fn update_inventory(&self, id: &str, body: &Value) -> SyncResult<Value> {
        let request = self.client.put(self.item_url(id)).json(body);
        self.send_json(Operation::UpdateInventory(id.to_string()), request).await
    }

    async fn delete_inventory(&self, id: &str) -> SyncResult<()> {
        let request = self.client.delete(self.item_url(id));
        self.send(&Operation::DeleteInventory(id.to_string()), request).await?;
        Ok(())
    }
}
