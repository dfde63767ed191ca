//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STORY_ASSISTANT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use story_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod agents;
mod ai;
mod error;
mod pipeline;
mod server;
mod session;

pub use agents::AgentsConfig;
pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use pipeline::PipelineConfig;
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "STORY_ASSISTANT";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion endpoint configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Agent instruction files
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Session eviction
    #[serde(default)]
    pub session: SessionConfig,

    /// Pipeline behaviour
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STORY_ASSISTANT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `STORY_ASSISTANT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `STORY_ASSISTANT__AI__API_KEY=...` -> `ai.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
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
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.session.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user_story::ReviewedSource;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "STORY_ASSISTANT__AI__API_KEY",
        "STORY_ASSISTANT__SERVER__PORT",
        "STORY_ASSISTANT__SERVER__ENVIRONMENT",
        "STORY_ASSISTANT__SESSION__IDLE_TTL_SECS",
        "STORY_ASSISTANT__PIPELINE__REVIEWED_SOURCE",
        "STORY_ASSISTANT__AGENTS__INSTRUCTIONS_DIR",
    ];

    fn set_minimal_env() {
        env::set_var("STORY_ASSISTANT__AI__API_KEY", "gsk_test");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.ai.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.pipeline.reviewed_source, ReviewedSource::History);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("STORY_ASSISTANT__SERVER__PORT", "3000");
        env::set_var("STORY_ASSISTANT__SERVER__ENVIRONMENT", "production");
        env::set_var("STORY_ASSISTANT__SESSION__IDLE_TTL_SECS", "900");
        env::set_var("STORY_ASSISTANT__PIPELINE__REVIEWED_SOURCE", "verdict");
        env::set_var("STORY_ASSISTANT__AGENTS__INSTRUCTIONS_DIR", "/etc/agents");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.session.idle_ttl_secs, 900);
        assert_eq!(config.pipeline.reviewed_source, ReviewedSource::Verdict);
        assert_eq!(
            config.agents.instructions_dir,
            std::path::PathBuf::from("/etc/agents")
        );
    }
}
