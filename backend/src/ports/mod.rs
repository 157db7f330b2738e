//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `LocalStorage` - Durable key-value medium (browser-style local store)
//! - `RemoteProjectClient` - Remote REST-like project collection
//! - `ProjectRepository` - Load/create/merge-update contract for documents
//!
//! ## Generation Ports
//!
//! - `GenerationGateway` - The three wizard suggestion operations
//! - `AIProvider` - LLM text completion used by the gateway adapter

mod ai_provider;
mod generation_gateway;
mod local_storage;
mod project_repository;
mod remote_project_client;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use generation_gateway::{
    GenerationError, GenerationGateway, PositioningRequest, PositioningSuggestion,
    SegmentDiscovery, SegmentDiscoveryRequest, TargetRecommendation, TargetRecommendationRequest,
    SUGGESTED_MIN_SEGMENTS,
};
pub use local_storage::{
    project_key, LocalStorage, StorageError, CURRENT_PROJECT_KEY, PROJECT_KEY_PREFIX,
};
pub use project_repository::ProjectRepository;
pub use remote_project_client::{
    RemoteError, RemoteProjectClient, RemoteProjectPayload, RemoteProjectRecord,
};
