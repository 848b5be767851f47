//! LLM provider abstraction layer
//!
//! Provider-agnostic interface for the completions the responder agents make,
//! with OpenAI and Anthropic backends.

pub mod provider;
pub mod providers;

pub use provider::*;
pub use providers::*;

use crate::config::AgentConfig;
use std::sync::Arc;

/// Build an LLM provider from configuration
///
/// The provider name in `llm.provider` selects the backend; the API key is
/// resolved from the environment variable named in `llm.api_key_env`.
pub fn create_provider(config: &AgentConfig) -> Result<Arc<dyn LlmProvider>, crate::AgentError> {
    let api_key = config.get_llm_api_key()?;

    let provider: Arc<dyn LlmProvider> = match config.llm.provider.as_str() {
        "anthropic" => {
            let mut provider_config = AnthropicConfig {
                api_key,
                ..Default::default()
            };
            if let Some(base_url) = &config.llm.base_url {
                provider_config.base_url = base_url.clone();
            }
            Arc::new(AnthropicProvider::new(provider_config)?)
        }
        "openai" => {
            let mut provider_config = OpenAiConfig {
                api_key,
                ..Default::default()
            };
            if let Some(base_url) = &config.llm.base_url {
                provider_config.base_url = base_url.clone();
            }
            Arc::new(OpenAiProvider::new(provider_config)?)
        }
        other => {
            return Err(crate::AgentError::LlmError(LlmError::UnknownProvider(
                other.to_string(),
            )))
        }
    };

    Ok(provider)
}
