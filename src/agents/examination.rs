//! Examination responder agent
//!
//! Serves diagnostic test results for the case. Recorded results in the case
//! file are returned verbatim (matched on a normalized test name); for tests
//! the case does not record, the agent asks the LLM to synthesize a result
//! consistent with the rest of the case.

use crate::agents::ExaminationResponder;
use crate::config::AgentConfig;
use crate::error::AgentResult;
use crate::llm::provider::{CompletionRequest, LlmProvider, Message, MessageRole};
use crate::protocol::messages::{CaseFile, GatekeeperResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// LLM-backed examination responder with recorded-result lookup
pub struct ExaminationAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ExaminationAgent {
    /// Create an examination agent from shared configuration
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        let provider = crate::llm::create_provider(config)?;
        Ok(Self::with_provider(provider, config))
    }

    /// Create an examination agent with an injected provider (used in tests)
    pub fn with_provider(provider: Arc<dyn LlmProvider>, config: &AgentConfig) -> Self {
        Self {
            provider,
            model: config.examination_model().to_string(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
        }
    }

    /// Normalize a test name for lookup: lower-case alphanumerics, single spaces
    fn normalize_test_name(name: &str) -> String {
        name.to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up a recorded result by normalized test name
    fn recorded_result<'a>(case_file: &'a CaseFile, test_name: &str) -> Option<&'a str> {
        let wanted = Self::normalize_test_name(test_name);
        case_file
            .test_results
            .iter()
            .find(|(recorded, _)| Self::normalize_test_name(recorded) == wanted)
            .map(|(_, result)| result.as_str())
    }

    fn build_system_prompt(case_file: &CaseFile) -> String {
        let mut prompt = String::from(
            "You are the examination service in a simulated clinical interview. \
             Given the case below, report the result of the requested diagnostic \
             test as it would plausibly read for this patient. Report findings \
             only; no interpretation, no diagnosis. If the test would not \
             realistically have been performed or adds nothing, state that the \
             result is unremarkable.\n\n",
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
impl ExaminationResponder for ExaminationAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn fetch_result(
        &self,
        test_name: &str,
        case_file: &CaseFile,
    ) -> AgentResult<GatekeeperResponse> {
        if let Some(result) = Self::recorded_result(case_file, test_name) {
            debug!(case_id = %case_file.case_id, test_name, "Serving recorded test result");
            return Ok(GatekeeperResponse::test_result(result, self.model.clone()));
        }

        debug!(case_id = %case_file.case_id, test_name, "Synthesizing test result");

        let request = CompletionRequest {
            messages: vec![
                Message {
                    role: MessageRole::System,
                    content: Self::build_system_prompt(case_file),
                },
                Message {
                    role: MessageRole::User,
                    content: format!("Report the result of: {test_name}"),
                },
            ],
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let completion = self.provider.complete(request).await?;

        Ok(GatekeeperResponse::test_result(
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
        CaseFile::new(
            "29F with abdominal pain",
            "29-year-old woman, two days of right lower quadrant pain.",
        )
        .with_test_result("Complete Blood Count", "WBC 14.2, Hgb 13.1, Plt 310")
    }

    #[test]
    fn test_normalize_test_name() {
        assert_eq!(
            ExaminationAgent::normalize_test_name("CT of the Abdomen, with contrast"),
            "ct of the abdomen with contrast"
        );
        assert_eq!(
            ExaminationAgent::normalize_test_name("  Complete   Blood Count "),
            "complete blood count"
        );
    }

    #[tokio::test]
    async fn test_recorded_result_served_without_llm() {
        let provider = Arc::new(MockLlmProvider::with_reply("should not be used"));
        let agent = ExaminationAgent::with_provider(provider.clone(), &AgentConfig::test_config());

        let response = agent
            .fetch_result("complete blood count", &sample_case())
            .await
            .unwrap();

        assert_eq!(response.response_type, ResponseType::TestResult);
        assert_eq!(response.content, "WBC 14.2, Hgb 13.1, Plt 310");
        assert!(provider.recorded_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_unrecorded_result_synthesized() {
        let provider = Arc::new(MockLlmProvider::with_reply("No acute findings."));
        let agent = ExaminationAgent::with_provider(provider.clone(), &AgentConfig::test_config());

        let response = agent
            .fetch_result("Chest X-ray", &sample_case())
            .await
            .unwrap();

        assert_eq!(response.content, "No acute findings.");
        let requests = provider.recorded_requests().await;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].messages[1].content.contains("Chest X-ray"));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockLlmProvider::with_failure("backend down"));
        let agent = ExaminationAgent::with_provider(provider, &AgentConfig::test_config());

        let result = agent.fetch_result("Chest X-ray", &sample_case()).await;
        assert!(result.is_err());
    }
}
