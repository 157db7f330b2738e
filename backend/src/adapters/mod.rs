//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Local key-value media and the project record store
//! - `remote` - Remote project collection clients (HTTP, in-memory)
//! - `sync` - Remote mirroring with local fallback
//! - `ai` - LLM providers and the generation gateway

pub mod ai;
pub mod remote;
pub mod storage;
pub mod sync;

pub use ai::{AnthropicConfig, AnthropicProvider, LlmGenerationGateway, MockAIProvider};
pub use remote::{HttpRemoteConfig, HttpRemoteProjectClient, InMemoryRemoteProjectClient};
pub use storage::{FileLocalStorage, InMemoryLocalStorage, ProjectRecordStore};
pub use sync::{RemoteSyncAdapter, SyncStatus};
