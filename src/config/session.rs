//! Session lifetime configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::storage::SessionLimits;

use super::error::ValidationError;

/// Session eviction settings. Zero disables the corresponding limit.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle time after which a session is evicted (0 = never)
    #[serde(default)]
    pub idle_ttl_secs: u64,

    /// How often the idle sweep runs
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Maximum live sessions; the least recently touched is evicted (0 = unbounded)
    #[serde(default)]
    pub max_sessions: usize,
}

impl SessionConfig {
    pub fn limits(&self) -> SessionLimits {
        SessionLimits {
            idle_ttl: (self.idle_ttl_secs > 0).then(|| Duration::from_secs(self.idle_ttl_secs)),
            max_sessions: (self.max_sessions > 0).then_some(self.max_sessions),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.idle_ttl_secs > 0 && self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: 0,
            sweep_interval_secs: default_sweep_interval(),
            max_sessions: 0,
        }
    }
}

fn default_sweep_interval() -> u64 {
    300
}
