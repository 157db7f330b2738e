//! Local Storage Port - Interface for the durable key-value medium.
//!
//! Models a browser-style local store: string keys mapping to serialized
//! text. The project record store and the remote sync fallback are both
//! built on top of it.
//!
//! # Key Scheme
//!
//! - [`CURRENT_PROJECT_KEY`] holds the active project document
//! - [`project_key`] gives the per-project record used as remote fallback

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId};

/// Well-known key holding the active project document.
pub const CURRENT_PROJECT_KEY: &str = "currentProject";

/// Prefix of per-project records.
pub const PROJECT_KEY_PREFIX: &str = "project-";

/// Returns the per-project storage key (`project-{id}`).
pub fn project_key(id: &ProjectId) -> String {
    format!("{}{}", PROJECT_KEY_PREFIX, id)
}

/// Errors raised by the local medium.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or otherwise not reachable.
    #[error("local storage unavailable: {0}")]
    Unavailable(String),

    /// The medium rejected the write (quota, permissions).
    #[error("write rejected for '{key}': {reason}")]
    WriteRejected { key: String, reason: String },

    /// I/O failure while reading or removing.
    #[error("io error: {0}")]
    Io(String),
}

impl StorageError {
    /// Creates a write rejected error.
    pub fn write_rejected(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WriteRejected {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::storage(err.to_string())
    }
}

/// Port for the local key-value medium.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Lists every stored key.
    async fn keys(&self) -> Result<Vec<String>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn project_key_uses_prefix() {
        let id = ProjectId::parse("42").unwrap();
        assert_eq!(project_key(&id), "project-42");
    }

    #[test]
    fn storage_error_maps_to_storage_failure() {
        let err: DomainError = StorageError::write_rejected("currentProject", "quota exceeded").into();
        assert_eq!(err.code, ErrorCode::StorageFailure);
        assert!(err.message.contains("quota exceeded"));
    }
}
