//! Patient responder agent
//!
//! Role-plays the simulated patient over an LLM provider. The system prompt
//! carries the full case history; the agent is instructed to reveal only what
//! the question actually asks for, the way a real patient would.

use crate::agents::PatientResponder;
use crate::config::AgentConfig;
use crate::error::AgentResult;
use crate::llm::provider::{CompletionRequest, LlmProvider, Message, MessageRole};
use crate::protocol::messages::{CaseFile, GatekeeperResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// LLM-backed patient responder
pub struct PatientAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl PatientAgent {
    /// Create a patient agent from shared configuration
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        let provider = crate::llm::create_provider(config)?;
        Ok(Self::with_provider(provider, config))
    }

    /// Create a patient agent with an injected provider (used in tests)
    pub fn with_provider(provider: Arc<dyn LlmProvider>, config: &AgentConfig) -> Self {
        Self {
            provider,
            model: config.patient_model().to_string(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
        }
    }

    fn build_system_prompt(case_file: &CaseFile) -> String {
        let mut prompt = String::from(
            "You are role-playing a patient in a simulated clinical interview. \
             Answer the physician's question truthfully based on the case \
             details below, speaking in first person as the patient. Reveal \
             only information the question actually asks for; do not volunteer \
             your diagnosis, test results, or unrelated findings.\n\n",
        );
        prompt.push_str("CASE HISTORY:\n");
        prompt.push_str(&case_file.full_history);
        if !case_file.physical_findings.is_empty() {
            prompt.push_str("\n\nPHYSICAL FINDINGS:\n");
            prompt.push_str(&case_file.physical_findings);
        }
        prompt
    }
}

#[async_trait]
impl PatientResponder for PatientAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn answer_question(
        &self,
        question: &str,
        case_file: &CaseFile,
    ) -> AgentResult<GatekeeperResponse> {
        debug!(case_id = %case_file.case_id, question, "Patient agent answering question");

        let request = CompletionRequest {
            messages: vec![
                Message {
                    role: MessageRole::System,
                    content: Self::build_system_prompt(case_file),
                },
                Message {
                    role: MessageRole::User,
                    content: question.to_string(),
                },
            ],
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let completion = self.provider.complete(request).await?;

        Ok(GatekeeperResponse::answer(
            completion.content,
            self.model.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::ResponseType;
    use crate::testing::mocks::MockLlmProvider;

    fn sample_case() -> CaseFile {
        let mut case = CaseFile::new(
            "29F with abdominal pain",
            "29-year-old woman, two days of right lower quadrant pain, nausea, no vomiting.",
        );
        case.physical_findings = "Tenderness at McBurney's point.".to_string();
        case
    }

    #[test]
    fn test_system_prompt_includes_history_and_findings() {
        let prompt = PatientAgent::build_system_prompt(&sample_case());
        assert!(prompt.contains("right lower quadrant pain"));
        assert!(prompt.contains("McBurney's point"));
        assert!(prompt.contains("first person"));
    }

    #[tokio::test]
    async fn test_answer_question_wraps_completion() {
        let provider = Arc::new(MockLlmProvider::with_reply("Yes, I felt feverish last night."));
        let agent = PatientAgent::with_provider(provider.clone(), &AgentConfig::test_config());

        let response = agent
            .answer_question("Do you have a fever?", &sample_case())
            .await
            .unwrap();

        assert_eq!(response.response_type, ResponseType::Answer);
        assert_eq!(response.content, "Yes, I felt feverish last night.");
        assert_eq!(response.model, "claude-sonnet-4-20250514");

        let requests = provider.recorded_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[1].content, "Do you have a fever?");
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockLlmProvider::with_failure("backend down"));
        let agent = PatientAgent::with_provider(provider, &AgentConfig::test_config());

        let result = agent
            .answer_question("Do you have a fever?", &sample_case())
            .await;

        assert!(result.is_err());
    }
}
