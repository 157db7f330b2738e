//! Remote Adapters
//!
//! Implementations of the RemoteProjectClient port.
//!
//! - **HttpRemoteProjectClient** - REST collection over `reqwest`
//! - **InMemoryRemoteProjectClient** - In-process collection (testing)

mod http_remote_client;
mod in_memory_remote_client;

pub use http_remote_client::{HttpRemoteConfig, HttpRemoteProjectClient};
pub use in_memory_remote_client::InMemoryRemoteProjectClient;
