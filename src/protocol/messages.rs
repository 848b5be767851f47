//! Message types for the simulated clinical interview
//!
//! This module defines the structures exchanged between the session driver,
//! the gatekeeper, and the responder agents: actions, case files, and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The closed set of action types a session can issue
///
/// The gatekeeper handles `AskQuestion` and `RequestTest`. `Diagnose` is a
/// final-diagnosis submission scored by the session driver; the gatekeeper has
/// no responder for it and rejects it at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    AskQuestion,
    RequestTest,
    Diagnose,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::AskQuestion => write!(f, "ASK_QUESTION"),
            ActionType::RequestTest => write!(f, "REQUEST_TEST"),
            ActionType::Diagnose => write!(f, "DIAGNOSE"),
        }
    }
}

/// A single request issued against the case: a typed tag plus free-text content
///
/// For `AskQuestion` the content is the question text; for `RequestTest` it is
/// the name of the test to order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentAction {
    pub action_type: ActionType,
    pub content: String,
}

impl AgentAction {
    pub fn ask_question(content: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::AskQuestion,
            content: content.into(),
        }
    }

    pub fn request_test(content: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::RequestTest,
            content: content.into(),
        }
    }
}

/// The simulated patient case
///
/// Shared, read-mostly context owned by the session. The gatekeeper passes it
/// through to responders without inspecting it; only the responders read its
/// fields when building their answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseFile {
    /// Unique case identifier
    pub case_id: Uuid,
    /// The vignette shown to the interviewer at session start
    pub initial_presentation: String,
    /// Full case history available to the patient responder
    pub full_history: String,
    /// Physical examination findings, if recorded for this case
    #[serde(default)]
    pub physical_findings: String,
    /// Recorded diagnostic test results, keyed by test name
    #[serde(default)]
    pub test_results: HashMap<String, String>,
}

impl CaseFile {
    pub fn new(initial_presentation: impl Into<String>, full_history: impl Into<String>) -> Self {
        Self {
            case_id: Uuid::new_v4(),
            initial_presentation: initial_presentation.into(),
            full_history: full_history.into(),
            physical_findings: String::new(),
            test_results: HashMap::new(),
        }
    }

    /// Add a recorded test result to the case
    pub fn with_test_result(
        mut self,
        test_name: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        self.test_results.insert(test_name.into(), result.into());
        self
    }
}

/// Which responder produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Patient responder answered a history question
    Answer,
    /// Examination responder returned a diagnostic test result
    TestResult,
}

/// Structured result returned by a responder through the gatekeeper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatekeeperResponse {
    pub response_type: ResponseType,
    /// The domain answer text
    pub content: String,
    /// Model identifier of the responder that produced this response
    pub model: String,
    /// When the response was produced
    pub timestamp: DateTime<Utc>,
}

impl GatekeeperResponse {
    pub fn answer(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Answer,
            content: content.into(),
            model: model.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn test_result(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::TestResult,
            content: content.into(),
            model: model.into(),
            timestamp: Utc::now(),
        }
    }
}
