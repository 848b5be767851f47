//! Configuration for the clinical interview simulation
//!
//! A single TOML configuration value is shared by the gatekeeper and both
//! responder agents. API keys are named by environment variable and resolved
//! at provider construction time, never stored in the file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Top-level configuration shared by all agents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub llm: LlmSection,
    /// Per-responder overrides (optional)
    #[serde(default)]
    pub agents: AgentsSection,
}

/// LLM provider settings shared by the responders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmSection {
    /// Provider name (e.g., "anthropic", "openai")
    pub provider: String,
    /// Default model identifier for responders without an override
    pub model: String,
    /// Environment variable containing the API key
    pub api_key_env: String,
    /// Optional base URL override (used to point tests at a local server)
    pub base_url: Option<String>,
    /// Optional temperature (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Optional max tokens
    pub max_tokens: Option<u32>,
}

/// Per-responder model overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentsSection {
    /// Model for the patient responder (falls back to `llm.model`)
    pub patient_model: Option<String>,
    /// Model for the examination responder (falls back to `llm.model`)
    pub examination_model: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AgentConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AgentConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.provider.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "llm.provider must not be empty".to_string(),
            ));
        }
        if self.llm.model.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "llm.model must not be empty".to_string(),
            ));
        }
        if let Some(temperature) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::InvalidConfig(format!(
                    "llm.temperature {temperature} outside range 0.0..=2.0"
                )));
            }
        }
        Ok(())
    }

    /// Get the LLM API key from the configured environment variable
    pub fn get_llm_api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.llm.api_key_env)
            .map_err(|_| ConfigError::EnvVarNotFound(self.llm.api_key_env.clone()))
    }

    /// Model for the patient responder
    pub fn patient_model(&self) -> &str {
        self.agents
            .patient_model
            .as_deref()
            .unwrap_or(&self.llm.model)
    }

    /// Model for the examination responder
    pub fn examination_model(&self) -> &str {
        self.agents
            .examination_model
            .as_deref()
            .unwrap_or(&self.llm.model)
    }

    /// Create a test configuration for unit testing
    #[cfg(test)]
    pub fn test_config() -> Self {
        let toml_content = r#"
[llm]
provider = "anthropic"
model = "claude-sonnet-4-20250514"
api_key_env = "ANTHROPIC_API_KEY"
temperature = 0.7
max_tokens = 1024
"#;
        toml::from_str(toml_content).expect("Test config should parse")
    }
}
