//! Project Repository Port - Persistence contract for project documents.
//!
//! Implemented by the local [`ProjectRecordStore`](crate::adapters::ProjectRecordStore)
//! for local-only deployments and by the
//! [`RemoteSyncAdapter`](crate::adapters::RemoteSyncAdapter), which mirrors to
//! the remote collection and falls back to the local store.
//!
//! Updates take a JSON partial that is deep-merged onto the current
//! document: objects merge key-wise, scalars and arrays are replaced.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::ProjectDocument;

/// Repository for project documents.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persists a new project and returns it with its final id.
    ///
    /// # Errors
    ///
    /// - `StorageFailure` if nothing could be persisted
    async fn create(&self, document: ProjectDocument) -> Result<ProjectDocument, DomainError>;

    /// Loads a project.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if no copy exists
    async fn get(&self, id: &ProjectId) -> Result<ProjectDocument, DomainError>;

    /// Loads every known project.
    async fn list(&self) -> Result<Vec<ProjectDocument>, DomainError>;

    /// Deep-merges `partial` onto the stored project and returns the result.
    ///
    /// Update is not a create: a missing project is `ProjectNotFound`.
    async fn update(&self, id: &ProjectId, partial: Value) -> Result<ProjectDocument, DomainError>;

    /// Removes a project.
    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError>;
}
