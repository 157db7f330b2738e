//! HTTP Remote Project Client - `RemoteProjectClient` over a REST collection.
//!
//! # Configuration
//!
//! ```ignore
//! let client = HttpRemoteProjectClient::new(
//!     HttpRemoteConfig::new("https://example.mockapi.io/project/projects")
//!         .with_timeout(Duration::from_secs(10)),
//! )?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::ports::{RemoteError, RemoteProjectClient, RemoteProjectPayload, RemoteProjectRecord};

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpRemoteConfig {
    /// Collection URL, e.g. `https://host/project/projects`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpRemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Remote project collection reached over HTTP.
pub struct HttpRemoteProjectClient {
    config: HttpRemoteConfig,
    client: Client,
}

impl HttpRemoteProjectClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Network` if the HTTP client cannot be built.
    pub fn new(config: HttpRemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn collection_url(&self) -> String {
        self.config.base_url.clone()
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.config.base_url, id)
    }

    async fn send(&self, id: Option<&str>, request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                RemoteError::network(format!("Connection failed: {}", e))
            } else {
                RemoteError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 404 {
            if let Some(id) = id {
                return Err(RemoteError::NotFound(id.to_string()));
            }
        }

        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::status(status.as_u16(), body))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RemoteProjectClient for HttpRemoteProjectClient {
    async fn create(&self, payload: &RemoteProjectPayload) -> Result<RemoteProjectRecord, RemoteError> {
        let request = self.client.post(self.collection_url()).json(payload);
        let response = self.send(None, request).await?;
        Self::parse(response).await
    }

    async fn get(&self, id: &str) -> Result<RemoteProjectRecord, RemoteError> {
        let request = self.client.get(self.item_url(id));
        let response = self.send(Some(id), request).await?;
        Self::parse(response).await
    }

    async fn list(&self) -> Result<Vec<RemoteProjectRecord>, RemoteError> {
        let request = self.client.get(self.collection_url());
        let response = self.send(None, request).await?;
        Self::parse(response).await
    }

    async fn update(
        &self,
        id: &str,
        payload: &RemoteProjectPayload,
    ) -> Result<RemoteProjectRecord, RemoteError> {
        let request = self.client.put(self.item_url(id)).json(payload);
        let response = self.send(Some(id), request).await?;
        Self::parse(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let request = self.client.delete(self.item_url(id));
        self.send(Some(id), request).await?;
        Ok(())
    }
}
