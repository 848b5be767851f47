//! Responder agents for the clinical interview
//!
//! Defines the two capability traits the gatekeeper dispatches to, plus the
//! LLM-backed implementations: the patient responder answers history
//! questions in character, and the examination responder serves diagnostic
//! test results.

pub mod examination;
pub mod patient;

pub use examination::ExaminationAgent;
pub use patient::PatientAgent;

use crate::error::AgentResult;
use crate::protocol::messages::{CaseFile, GatekeeperResponse};
use async_trait::async_trait;

/// Capability of answering patient-history questions for a case
#[async_trait]
pub trait PatientResponder: Send + Sync {
    /// Model identifier, for observability only
    fn model(&self) -> &str;

    /// Answer a question about the patient's history or symptoms
    async fn answer_question(
        &self,
        question: &str,
        case_file: &CaseFile,
    ) -> AgentResult<GatekeeperResponse>;
}

/// Capability of producing diagnostic test results for a case
#[async_trait]
pub trait ExaminationResponder: Send + Sync {
    /// Model identifier, for observability only
    fn model(&self) -> &str;

    /// Fetch the result of a named diagnostic test
    async fn fetch_result(
        &self,
        test_name: &str,
        case_file: &CaseFile,
    ) -> AgentResult<GatekeeperResponse>;
}
