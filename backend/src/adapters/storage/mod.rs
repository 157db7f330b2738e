//! Storage Adapters
//!
//! Implementations of the LocalStorage port plus the project record store
//! built on top of it.
//!
//! ## Available Adapters
//!
//! - **FileLocalStorage** - One file per key on disk
//! - **InMemoryLocalStorage** - Keys in memory (testing/development)
//! - **ProjectRecordStore** - Document load/save/merge-update over either
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileLocalStorage, ProjectRecordStore};
//!
//! let store = ProjectRecordStore::new(Arc::new(FileLocalStorage::new("./data")));
//! ```

mod file_local_storage;
mod in_memory_local_storage;
mod project_record_store;

pub use file_local_storage::FileLocalStorage;
pub use in_memory_local_storage::InMemoryLocalStorage;
pub use project_record_store::ProjectRecordStore;
