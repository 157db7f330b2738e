//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `VENTURE_PLANNER` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a local-only,
//! file-backed setup without live generation.
//!
//! # Example
//!
//! ```no_run
//! use venture_planner::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod logging;
mod remote;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use remote::RemoteConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Local key-value medium
    #[serde(default)]
    pub storage: StorageConfig,

    /// Remote project collection (optional mirroring)
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Text-generation provider
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `VENTURE_PLANNER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `VENTURE_PLANNER__REMOTE__BASE_URL=https://...` -> `remote.base_url`
    /// - `VENTURE_PLANNER__AI__ANTHROPIC_API_KEY=...` -> `ai.anthropic_api_key`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VENTURE_PLANNER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a zero timeout, a zero failure
    /// threshold, a non-http(s) URL or an empty configured API key.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.remote.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
