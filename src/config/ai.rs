//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::adapters::ai::{OpenAIConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

use super::error::ValidationError;

/// OpenAI-compatible endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key. Required, never logged.
    pub api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Endpoint base URL, without `/chat/completions`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,

    /// Completion token cap; provider default when unset
    pub max_tokens: Option<u32>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Builds the provider configuration.
    pub fn provider_config(&self) -> Result<OpenAIConfig, ValidationError> {
        let key = self
            .api_key
            .clone()
            .filter(|_| self.has_api_key())
            .ok_or(ValidationError::MissingRequired("AI__API_KEY"))?;

        Ok(OpenAIConfig::from_secret(key)
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout())
            .with_max_retries(self.max_retries)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens))
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyModel);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            temperature: None,
            max_tokens: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(key: &str) -> AiConfig {
        AiConfig {
            api_key: Some(Secret::new(key.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_validation_requires_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );
        assert!(with_key("   ").validate().is_err());
        assert!(with_key("gsk_xxx").validate().is_ok());
    }

    #[test]
    fn test_validation_base_url_scheme() {
        let config = AiConfig {
            base_url: "ftp://example.com".to_string(),
            ..with_key("gsk_xxx")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBaseUrl));
    }

    #[test]
    fn test_provider_config_carries_settings() {
        let config = AiConfig {
            model: "custom-model".to_string(),
            base_url: "http://localhost:9000/v1/".to_string(),
            temperature: Some(0.2),
            ..with_key("gsk_xxx")
        };

        let provider = config.provider_config().unwrap();

        assert_eq!(provider.model, "custom-model");
        assert_eq!(provider.base_url, "http://localhost:9000/v1");
        assert_eq!(provider.temperature, Some(0.2));
    }

    #[test]
    fn test_provider_config_without_key_fails() {
        assert!(AiConfig::default().provider_config().is_err());
    }
}
