//! AI Adapters.
//!
//! Implementations of the AIProvider and GenerationGateway ports.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Anthropic Messages API
//! - `MockAIProvider` - Configurable mock for testing
//! - `LlmGenerationGateway` - The three wizard suggestions over any `AIProvider`

mod anthropic_provider;
mod llm_generation_gateway;
mod mock_provider;
pub mod prompts;

pub use anthropic_provider::{
    AnthropicConfig, AnthropicProvider, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL,
};
pub use llm_generation_gateway::{parse_completion, LlmGenerationGateway};
pub use mock_provider::MockAIProvider;
