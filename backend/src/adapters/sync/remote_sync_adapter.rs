//! Remote Sync Adapter - `ProjectRepository` that mirrors to the remote
//! collection and degrades to the local record store.
//!
//! # Policy
//!
//! - The local record store always receives the final document. When the
//!   remote call failed, a local write failure is the caller's
//!   `StorageFailure`; when the remote call succeeded it is only logged.
//! - Remote failures never surface to the caller. They are logged and
//!   counted once per adapter operation; see [`SyncStatus`].
//! - A remote record whose `data` blob is not valid JSON reads as an empty
//!   document carrying only the record's id and business fields.
//! - The remote record id is authoritative: a project created while the
//!   remote is reachable takes the id the collection assigned.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::adapters::storage::ProjectRecordStore;
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, Timestamp};
use crate::domain::project::{shallow_merge, ProjectDocument};
use crate::ports::{
    project_key, ProjectRepository, RemoteError, RemoteProjectClient, RemoteProjectPayload,
    RemoteProjectRecord,
};

/// Consecutive failures after which the adapter reports degraded mode.
pub const DEFAULT_DEGRADED_AFTER_FAILURES: u32 = 3;

/// Observable health of the remote mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    /// True once consecutive failures reached the threshold.
    pub degraded: bool,
    pub consecutive_failures: u32,
    /// Message of the most recent remote failure.
    pub last_failure: Option<String>,
    pub last_failure_at: Option<Timestamp>,
    pub last_success_at: Option<Timestamp>,
}

/// Project repository with remote mirroring and local fallback.
pub struct RemoteSyncAdapter {
    remote: Arc<dyn RemoteProjectClient>,
    local: Arc<ProjectRecordStore>,
    degraded_after: u32,
    status: RwLock<SyncStatus>,
}

impl RemoteSyncAdapter {
    pub fn new(remote: Arc<dyn RemoteProjectClient>, local: Arc<ProjectRecordStore>) -> Self {
        Self {
            remote,
            local,
            degraded_after: DEFAULT_DEGRADED_AFTER_FAILURES,
            status: RwLock::new(SyncStatus::default()),
        }
    }

    /// Sets the failure threshold for degraded mode (minimum 1).
    pub fn with_degraded_after(mut self, failures: u32) -> Self {
        self.degraded_after = failures.max(1);
        self
    }

    /// Current remote health.
    pub async fn sync_status(&self) -> SyncStatus {
        self.status.read().await.clone()
    }

    /// The local record store this adapter falls back to.
    pub fn local(&self) -> &Arc<ProjectRecordStore> {
        &self.local
    }

    async fn record_success(&self) {
        let mut status = self.status.write().await;
        if status.degraded {
            info!(
                failures = status.consecutive_failures,
                "Remote project collection reachable again"
            );
        }
        status.degraded = false;
        status.consecutive_failures = 0;
        status.last_success_at = Some(Timestamp::now());
    }

    async fn record_failure(&self, operation: &str, err: &RemoteError) {
        let mut status = self.status.write().await;
        status.consecutive_failures = status.consecutive_failures.saturating_add(1);
        status.last_failure = Some(err.to_string());
        status.last_failure_at = Some(Timestamp::now());

        warn!(
            operation,
            error = %err,
            consecutive_failures = status.consecutive_failures,
            "Remote project call failed, using local store"
        );

        if !status.degraded && status.consecutive_failures >= self.degraded_after {
            status.degraded = true;
            warn!(
                threshold = self.degraded_after,
                "Remote project sync degraded to local-only"
            );
        }
    }

    /// Records the outcome of a remote call. A 404 means the remote answered.
    async fn observe<T>(&self, operation: &str, result: &Result<T, RemoteError>) {
        match result {
            Ok(_) | Err(RemoteError::NotFound(_)) => self.record_success().await,
            Err(err) => self.record_failure(operation, err).await,
        }
    }

    /// Writes the local copy; failures are logged, not returned.
    async fn mirror_locally(&self, document: &ProjectDocument) {
        if let Err(err) = self.local.save(&project_key(&document.id), document).await {
            warn!(project_id = %document.id, error = %err, "Local mirror write failed");
        }
    }

    async fn read_local(&self, id: &ProjectId) -> Result<ProjectDocument, DomainError> {
        self.local.load(&project_key(id)).await
    }
}

/// Builds the remote payload for a document.
pub fn serialize_for_remote(document: &ProjectDocument) -> Result<RemoteProjectPayload, DomainError> {
    Ok(RemoteProjectPayload {
        business_name: document.business.name.clone(),
        business_type: document.business.business_type.as_str().to_string(),
        data: document.to_json()?,
    })
}

/// Parses a remote record into a document tree.
///
/// A malformed `data` blob degrades to an empty object. The record id and
/// the non-empty top-level business fields win over the blob.
pub fn deserialize_remote(record: &RemoteProjectRecord) -> Value {
    let mut parsed = match serde_json::from_str::<Value>(&record.data) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            if !record.data.trim().is_empty() {
                warn!(remote_id = %record.id, "Remote project data is not a JSON object, reading as empty");
            }
            Map::new()
        }
    };

    parsed.insert("id".to_string(), Value::String(record.id.clone()));

    let business = parsed
        .entry("business".to_string())
        .or_insert_with(|| json!({}));
    if !business.is_object() {
        *business = json!({});
    }
    if let Value::Object(fields) = business {
        if !record.business_name.is_empty() {
            fields.insert("name".to_string(), Value::String(record.business_name.clone()));
        }
        if !record.business_type.is_empty() {
            fields.insert("type".to_string(), Value::String(record.business_type.clone()));
        }
    }

    Value::Object(parsed)
}

fn document_from_remote(record: &RemoteProjectRecord) -> Result<ProjectDocument, RemoteError> {
    ProjectDocument::from_value(deserialize_remote(record))
        .map_err(|e| RemoteError::InvalidResponse(e.message))
}

/// Overlays the server's view on `base`, keeping `base` if the result does
/// not form a document.
fn adopt_server_view(base: &ProjectDocument, record: &RemoteProjectRecord) -> ProjectDocument {
    let overlay = deserialize_remote(record);
    let adopted = base
        .to_value()
        .and_then(|value| ProjectDocument::from_value(shallow_merge(&value, &overlay)));
    match adopted {
        Ok(document) => document,
        Err(err) => {
            warn!(remote_id = %record.id, error = %err, "Ignoring unusable remote response body");
            ProjectDocument {
                id: ProjectId::parse(record.id.clone()).unwrap_or_else(|_| base.id.clone()),
                ..base.clone()
            }
        }
    }
}

#[async_trait]
impl ProjectRepository for RemoteSyncAdapter {
    async fn create(&self, document: ProjectDocument) -> Result<ProjectDocument, DomainError> {
        let payload = serialize_for_remote(&document)?;
        let result = self.remote.create(&payload).await;
        self.observe("create", &result).await;

        match result {
            Ok(record) => {
                let created = adopt_server_view(&document, &record);
                self.mirror_locally(&created).await;
                info!(project_id = %created.id, "Project created remotely");
                Ok(created)
            }
            Err(_) => {
                self.local.save(&project_key(&document.id), &document).await?;
                info!(project_id = %document.id, "Project created locally");
                Ok(document)
            }
        }
    }

    async fn get(&self, id: &ProjectId) -> Result<ProjectDocument, DomainError> {
        let result = self.remote.get(id.as_str()).await;
        self.observe("get", &result).await;

        match result.and_then(|record| document_from_remote(&record)) {
            Ok(document) => Ok(document),
            Err(err) => {
                debug!(project_id = %id, error = %err, "Reading project from local fallback");
                self.read_local(id).await
            }
        }
    }

    async fn list(&self) -> Result<Vec<ProjectDocument>, DomainError> {
        let result = self.remote.list().await;
        self.observe("list", &result).await;

        match result {
            Ok(records) => Ok(records
                .iter()
                .filter_map(|record| match document_from_remote(record) {
                    Ok(document) => Some(document),
                    Err(err) => {
                        warn!(remote_id = %record.id, error = %err, "Skipping unreadable remote project");
                        None
                    }
                })
                .collect()),
            Err(_) => self.local.load_all_projects().await,
        }
    }

    async fn update(&self, id: &ProjectId, partial: Value) -> Result<ProjectDocument, DomainError> {
        // The read counts toward sync health only when it fails; the PUT
        // that follows records the outcome of a reachable remote.
        let (current, reachable) = match self.remote.get(id.as_str()).await {
            Ok(record) => match document_from_remote(&record) {
                Ok(document) => (document, true),
                Err(err) => {
                    debug!(project_id = %id, error = %err, "Remote copy unusable, merging onto local");
                    (self.read_local(id).await?, true)
                }
            },
            Err(RemoteError::NotFound(_)) => (self.read_local(id).await?, true),
            Err(err) => {
                self.record_failure("update", &err).await;
                (self.read_local(id).await?, false)
            }
        };
        let merged = current.merged(&partial)?;

        let updated = if reachable {
            let payload = serialize_for_remote(&merged)?;
            let result = self.remote.update(id.as_str(), &payload).await;
            self.observe("update", &result).await;
            match result {
                Ok(record) => {
                    let updated = adopt_server_view(&merged, &record);
                    self.mirror_locally(&updated).await;
                    updated
                }
                Err(_) => {
                    self.local.save(&project_key(id), &merged).await?;
                    merged
                }
            }
        } else {
            self.local.save(&project_key(id), &merged).await?;
            merged
        };

        self.local.announce(&updated).await;
        Ok(updated)
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError> {
        let remote = self.remote.delete(id.as_str()).await;
        self.observe("delete", &remote).await;
        let local = self.local.remove(&project_key(id)).await;
        self.local.close_if_current(id).await;

        match (remote, local) {
            (Ok(()), _) | (_, Ok(())) => Ok(()),
            (Err(remote_err), Err(local_err)) => Err(DomainError::new(
                ErrorCode::StorageFailure,
                format!("Failed to delete project {}", id),
            )
            .with_detail("remote", remote_err.to_string())
            .with_detail("local", local_err.message)),
        }
    }
}
