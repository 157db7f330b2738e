//! Sync Adapters
//!
//! `ProjectRepository` implementations that combine the remote collection
//! with the local record store.

mod remote_sync_adapter;

pub use remote_sync_adapter::{
    deserialize_remote, serialize_for_remote, RemoteSyncAdapter, SyncStatus,
    DEFAULT_DEGRADED_AFTER_FAILURES,
};
