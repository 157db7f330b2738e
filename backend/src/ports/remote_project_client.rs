//! Remote Project Client Port - Interface for the remote project collection.
//!
//! The remote side is a minimal REST-like collection:
//!
//! ```text
//! POST   /projects        create, server assigns the id
//! GET    /projects/:id    fetch one
//! GET    /projects        list all
//! PUT    /projects/:id    replace one
//! DELETE /projects/:id    remove one
//! ```
//!
//! Each record carries the business name and type at top level and the full
//! project document serialized as text in `data`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A project as stored by the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProjectRecord {
    pub id: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub data: String,
}

/// Payload sent on create and update. The id travels in the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProjectPayload {
    pub business_name: String,
    pub business_type: String,
    pub data: String,
}

/// Remote collection errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    /// Record does not exist remotely.
    #[error("remote project not found: {0}")]
    NotFound(String),

    /// Non-2xx response.
    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded its deadline.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Response body was not the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    /// Creates a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}

/// Port for the remote project collection.
#[async_trait]
pub trait RemoteProjectClient: Send + Sync {
    /// Creates a record; the server assigns the id.
    async fn create(&self, payload: &RemoteProjectPayload) -> Result<RemoteProjectRecord, RemoteError>;

    /// Fetches one record.
    async fn get(&self, id: &str) -> Result<RemoteProjectRecord, RemoteError>;

    /// Fetches every record.
    async fn list(&self) -> Result<Vec<RemoteProjectRecord>, RemoteError>;

    /// Replaces a record.
    async fn update(
        &self,
        id: &str,
        payload: &RemoteProjectPayload,
    ) -> Result<RemoteProjectRecord, RemoteError>;

    /// Removes a record.
    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}
