//! Error types for clinical interview agents
//!
//! Distinguishes dispatch failures (a caller handed the gatekeeper an action
//! type it has no responder for) from collaborator and configuration errors.
//! Validation rejections are not errors; see `Gatekeeper::validate_request`.

use crate::protocol::messages::ActionType;
use thiserror::Error;

/// Main error type for agent operations
#[derive(Debug, Error)]
pub enum AgentError {
    /// The gatekeeper has no responder registered for this action type.
    ///
    /// This signals a caller/integration bug, not bad user input: the session
    /// driver routed an action here that belongs to another component.
    #[error("Gatekeeper cannot process action type: {action_type}")]
    UnsupportedAction { action_type: ActionType },

    #[error("LLM provider error: {0}")]
    LlmError(#[from] crate::llm::provider::LlmError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl AgentError {
    /// Create a dispatch-failure error for an unroutable action type
    pub fn unsupported_action(action_type: ActionType) -> Self {
        Self::UnsupportedAction { action_type }
    }

    /// Create internal error
    pub fn internal_error<S: Into<String>>(message: S) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;
