//! Remote project collection configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::{is_http_url, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the project collection. Absent means local-only.
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Consecutive failures before sync reports degraded mode
    #[serde(default = "default_degraded_after")]
    pub degraded_after_failures: u32,
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether remote mirroring is configured.
    pub fn is_enabled(&self) -> bool {
        self.base_url.as_ref().is_some_and(|u| !u.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("remote"));
        }
        if self.degraded_after_failures == 0 {
            return Err(ValidationError::InvalidFailureThreshold);
        }
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidUrl("remote"));
            }
        }
        Ok(())
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout(),
            degraded_after_failures: default_degraded_after(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_degraded_after() -> u32 {
    3
}
