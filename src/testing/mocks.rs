//! Mock implementations for testing
//!
//! Provides mock PatientResponder, ExaminationResponder, and LlmProvider
//! implementations that record their inputs and return canned replies.

use crate::agents::{ExaminationResponder, PatientResponder};
use crate::error::{AgentError, AgentResult};
use crate::llm::provider::{
    CompletionRequest, CompletionResponse, FinishReason, LlmError, LlmProvider, TokenUsage,
};
use crate::protocol::messages::{CaseFile, GatekeeperResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Mock patient responder that records every question it receives
#[derive(Default)]
pub struct MockPatientResponder {
    pub reply: String,
    pub model: String,
    pub should_fail: bool,
    pub received: Arc<Mutex<Vec<(String, Uuid)>>>,
}

impl MockPatientResponder {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            model: "mock-patient".to_string(),
            ..Default::default()
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            model: "mock-patient".to_string(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Questions received so far, paired with the case id they came with
    pub async fn received_questions(&self) -> Vec<(String, Uuid)> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl PatientResponder for MockPatientResponder {
    fn model(&self) -> &str {
        &self.model
    }

    async fn answer_question(
        &self,
        question: &str,
        case_file: &CaseFile,
    ) -> AgentResult<GatekeeperResponse> {
        if self.should_fail {
            return Err(AgentError::internal_error("Mock patient failure"));
        }
        self.received
            .lock()
            .await
            .push((question.to_string(), case_file.case_id));
        Ok(GatekeeperResponse::answer(
            self.reply.clone(),
            self.model.clone(),
        ))
    }
}

/// Mock examination responder that records every test request it receives
#[derive(Default)]
pub struct MockExaminationResponder {
    pub reply: String,
    pub model: String,
    pub should_fail: bool,
    pub received: Arc<Mutex<Vec<(String, Uuid)>>>,
}

impl MockExaminationResponder {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            model: "mock-exam".to_string(),
            ..Default::default()
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            model: "mock-exam".to_string(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Test requests received so far, paired with the case id they came with
    pub async fn received_requests(&self) -> Vec<(String, Uuid)> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl ExaminationResponder for MockExaminationResponder {
    fn model(&self) -> &str {
        &self.model
    }

    async fn fetch_result(
        &self,
        test_name: &str,
        case_file: &CaseFile,
    ) -> AgentResult<GatekeeperResponse> {
        if self.should_fail {
            return Err(AgentError::internal_error("Mock examination failure"));
        }
        self.received
            .lock()
            .await
            .push((test_name.to_string(), case_file.case_id));
        Ok(GatekeeperResponse::test_result(
            self.reply.clone(),
            self.model.clone(),
        ))
    }
}

/// Mock LLM provider returning a canned completion
#[derive(Default)]
pub struct MockLlmProvider {
    pub reply: String,
    pub failure: Option<String>,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmProvider {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Default::default()
        }
    }

    pub fn with_failure(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Completion requests received so far
    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        if let Some(message) = &self.failure {
            return Err(LlmError::RequestFailed(message.clone()));
        }
        let model = request.model.clone();
        self.requests.lock().await.push(request);
        Ok(CompletionResponse {
            content: self.reply.clone(),
            model,
            usage: TokenUsage::default(),
            finish_reason: FinishReason::Stop,
        })
    }
}
