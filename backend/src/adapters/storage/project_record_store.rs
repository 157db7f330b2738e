//! Project Record Store
//!
//! Persists whole project documents in a [`LocalStorage`] medium and owns
//! the merge-update primitive. Every merged result is published to
//! subscribers so in-memory copies can refresh from the stored truth.
//!
//! Besides the per-project `project-{id}` records, the well-known
//! `currentProject` key holds the project the user has open. Once a project
//! is opened, every merged update of it is mirrored into that key, and
//! deleting it clears the key.
//!
//! ```ignore
//! let store = ProjectRecordStore::new(Arc::new(InMemoryLocalStorage::new()));
//! let mut updates = store.subscribe();
//!
//! store.open_project(&document).await?;
//! let merged = store
//!     .update(&project_key(&document.id), |_| json!({ "marketability": { "nicheSuggestion": "..." } }))
//!     .await?;
//! assert_eq!(updates.recv().await?, merged);
//! assert_eq!(store.load_current().await?, merged);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::ProjectDocument;
use crate::ports::{
    project_key, LocalStorage, ProjectRepository, CURRENT_PROJECT_KEY, PROJECT_KEY_PREFIX,
};

/// Capacity of the update notification channel.
const UPDATE_CHANNEL_CAPACITY: usize = 32;

/// Local store of project documents with merge-update and change notification.
pub struct ProjectRecordStore {
    storage: Arc<dyn LocalStorage>,
    updates: broadcast::Sender<ProjectDocument>,
    write_lock: Mutex<()>,
}

impl ProjectRecordStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            storage,
            updates,
            write_lock: Mutex::new(()),
        }
    }

    /// Receives every document produced by a merge update.
    pub fn subscribe(&self) -> broadcast::Receiver<ProjectDocument> {
        self.updates.subscribe()
    }

    /// Pushes a document to subscribers.
    pub fn publish(&self, document: &ProjectDocument) {
        // No subscribers is fine
        let _ = self.updates.send(document.clone());
    }

    /// Refreshes the open-project copy if `document` is the open project,
    /// then publishes it.
    pub async fn announce(&self, document: &ProjectDocument) {
        match self.current_project_id().await {
            Ok(Some(open)) if open == document.id => {
                if let Err(err) = self.save_current(document).await {
                    warn!(project_id = %document.id, error = %err, "Failed to refresh current project");
                }
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "Current project unreadable, not refreshed"),
        }
        self.publish(document);
    }

    /// Loads the document stored under `key`.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the key is empty
    /// - `StorageFailure` if the medium is unavailable
    /// - `SerializationFailed` if the stored text is not a document
    pub async fn load(&self, key: &str) -> Result<ProjectDocument, DomainError> {
        self.try_load(key)
            .await?
            .ok_or_else(|| DomainError::not_found(key))
    }

    /// Loads the document stored under `key`, if any.
    pub async fn try_load(&self, key: &str) -> Result<Option<ProjectDocument>, DomainError> {
        let Some(raw) = self.storage.get(key).await? else {
            return Ok(None);
        };
        debug!(key, bytes = raw.len(), "Loaded project record");
        ProjectDocument::from_json(&raw).map(Some)
    }

    /// Overwrites the full document under `key`.
    pub async fn save(&self, key: &str, document: &ProjectDocument) -> Result<(), DomainError> {
        let raw = document.to_json()?;
        self.storage.set(key, &raw).await?;
        debug!(key, project_id = %document.id, "Saved project record");
        Ok(())
    }

    /// Loads, applies `patch`, deep-merges its output, saves and publishes.
    ///
    /// Update is not a create: a missing key is `ProjectNotFound`. A patch
    /// that changes the id, or whose merged result is no longer a valid
    /// document, is rejected and nothing is written.
    pub async fn update<F>(&self, key: &str, patch: F) -> Result<ProjectDocument, DomainError>
    where
        F: FnOnce(&ProjectDocument) -> Value + Send,
    {
        let _guard = self.write_lock.lock().await;

        let current = self.load(key).await?;
        let partial = patch(&current);
        let merged = current.merged(&partial)?;

        self.save(key, &merged).await?;
        if key == CURRENT_PROJECT_KEY {
            self.publish(&merged);
        } else {
            self.announce(&merged).await;
        }
        Ok(merged)
    }

    /// Removes the document under `key`.
    pub async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.storage.remove(key).await?;
        debug!(key, "Removed project record");
        Ok(())
    }

    /// Loads every per-project record, skipping entries that do not parse.
    pub async fn load_all_projects(&self) -> Result<Vec<ProjectDocument>, DomainError> {
        let mut documents = Vec::new();
        for key in self.storage.keys().await? {
            if !key.starts_with(PROJECT_KEY_PREFIX) {
                continue;
            }
            match self.try_load(&key).await {
                Ok(Some(document)) => documents.push(document),
                Ok(None) => {}
                Err(err) => warn!(key = %key, error = %err, "Skipping unreadable project record"),
            }
        }
        Ok(documents)
    }

    // ─── Well-known current project ─────────────────────────────────────────

    /// Makes `document` the open project.
    pub async fn open_project(&self, document: &ProjectDocument) -> Result<(), DomainError> {
        self.save_current(document).await?;
        info!(project_id = %document.id, "Project opened");
        Ok(())
    }

    /// Id of the open project, if any.
    pub async fn current_project_id(&self) -> Result<Option<ProjectId>, DomainError> {
        Ok(self.try_load(CURRENT_PROJECT_KEY).await?.map(|document| document.id))
    }

    pub async fn load_current(&self) -> Result<ProjectDocument, DomainError> {
        self.load(CURRENT_PROJECT_KEY).await
    }

    pub async fn save_current(&self, document: &ProjectDocument) -> Result<(), DomainError> {
        self.save(CURRENT_PROJECT_KEY, document).await
    }

    /// Clears the open-project key if it holds project `id`.
    pub async fn close_if_current(&self, id: &ProjectId) {
        match self.current_project_id().await {
            Ok(Some(open)) if &open == id => {
                if let Err(err) = self.remove(CURRENT_PROJECT_KEY).await {
                    warn!(project_id = %id, error = %err, "Failed to clear current project");
                }
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "Current project unreadable, not cleared"),
        }
    }
}

#[async_trait]
impl ProjectRepository for ProjectRecordStore {
    async fn create(&self, document: ProjectDocument) -> Result<ProjectDocument, DomainError> {
        self.save(&project_key(&document.id), &document).await?;
        Ok(document)
    }

    async fn get(&self, id: &ProjectId) -> Result<ProjectDocument, DomainError> {
        self.load(&project_key(id)).await
    }

    async fn list(&self) -> Result<Vec<ProjectDocument>, DomainError> {
        self.load_all_projects().await
    }

    async fn update(&self, id: &ProjectId, partial: Value) -> Result<ProjectDocument, DomainError> {
        ProjectRecordStore::update(self, &project_key(id), move |_| partial).await
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError> {
        self.remove(&project_key(id)).await?;
        self.close_if_current(id).await;
        Ok(())
    }
}
