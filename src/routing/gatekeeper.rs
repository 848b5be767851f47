//! Gatekeeper: validation and dispatch for interview actions
//!
//! The gatekeeper is a stateless dispatch table keyed by action type, with a
//! validation side-gate that rejects underspecified requests before they
//! reach a responder. Callers are expected to run `validate_request` first;
//! `process_action` does not re-check.

use crate::agents::{ExaminationAgent, ExaminationResponder, PatientAgent, PatientResponder};
use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};
use crate::protocol::messages::{ActionType, AgentAction, CaseFile, GatekeeperResponse};
use std::sync::Arc;
use tracing::{info, warn};

/// Overly broad question phrases, matched as lower-cased substrings
///
/// Substring containment is deliberate: over-inclusive rejection beats
/// missing an obvious fishing request.
const BROAD_QUESTION_PHRASES: &[&str] = &[
    "tell me everything",
    "what's wrong",
    "what should i do",
    "give me all information",
    "summarize the case",
];

/// Vague test-request phrases, matched the same way
const VAGUE_TEST_PHRASES: &[&str] = &[
    "run blood work",
    "do some imaging",
    "order labs",
    "get tests",
    "run diagnostics",
];

const SPECIFIC_QUESTION_GUIDANCE: &str =
    "Please ask more specific questions about the patient's history or examination findings.";

const SPECIFIC_TEST_GUIDANCE: &str = "Please specify the exact test you would like to order \
     (e.g., 'Complete Blood Count', 'CT of the abdomen with contrast').";

const EMPTY_QUESTION_GUIDANCE: &str =
    "Please provide the question you would like to ask the patient.";

const EMPTY_TEST_GUIDANCE: &str = "Please specify the test you would like to order.";

/// Routes interview actions to the patient and examination responders
pub struct Gatekeeper {
    patient: Arc<dyn PatientResponder>,
    examination: Arc<dyn ExaminationResponder>,
    model: String,
}

impl Gatekeeper {
    /// Create a gatekeeper with both responders built from shared configuration
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        let patient = Arc::new(PatientAgent::new(config)?);
        let examination = Arc::new(ExaminationAgent::new(config)?);
        Ok(Self::with_responders(patient, examination))
    }

    /// Create a gatekeeper with injected responders (used in tests)
    pub fn with_responders(
        patient: Arc<dyn PatientResponder>,
        examination: Arc<dyn ExaminationResponder>,
    ) -> Self {
        let model = format!("patient={}, exam={}", patient.model(), examination.model());
        Self {
            patient,
            examination,
            model,
        }
    }

    /// Composite identifier of the underlying responder models
    ///
    /// For observability only; never used in control flow.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Validate whether an action is specific enough to dispatch
    ///
    /// Pure function of the action's type and content. Returns `(true, "")`
    /// for acceptable actions, `(false, guidance)` for rejected ones. Action
    /// types the gatekeeper does not handle pass through unconditionally;
    /// they fail later in `process_action`.
    pub fn validate_request(&self, action: &AgentAction) -> (bool, String) {
        match action.action_type {
            ActionType::AskQuestion => {
                if action.content.trim().is_empty() {
                    return (false, EMPTY_QUESTION_GUIDANCE.to_string());
                }
                let question_lower = action.content.to_lowercase();
                for phrase in BROAD_QUESTION_PHRASES {
                    if question_lower.contains(phrase) {
                        return (false, SPECIFIC_QUESTION_GUIDANCE.to_string());
                    }
                }
                (true, String::new())
            }
            ActionType::RequestTest => {
                if action.content.trim().is_empty() {
                    return (false, EMPTY_TEST_GUIDANCE.to_string());
                }
                let test_lower = action.content.to_lowercase();
                for phrase in VAGUE_TEST_PHRASES {
                    if test_lower.contains(phrase) {
                        return (false, SPECIFIC_TEST_GUIDANCE.to_string());
                    }
                }
                (true, String::new())
            }
            _ => (true, String::new()),
        }
    }

    /// Dispatch an action to the responder registered for its type
    ///
    /// Responder errors propagate unchanged; the gatekeeper adds no handling
    /// on the delegation path.
    pub async fn process_action(
        &self,
        action: &AgentAction,
        case_file: &CaseFile,
    ) -> AgentResult<GatekeeperResponse> {
        match action.action_type {
            ActionType::AskQuestion => {
                info!(case_id = %case_file.case_id, "Dispatching question to patient responder");
                self.patient
                    .answer_question(&action.content, case_file)
                    .await
            }
            ActionType::RequestTest => {
                info!(case_id = %case_file.case_id, "Dispatching test request to examination responder");
                self.examination
                    .fetch_result(&action.content, case_file)
                    .await
            }
            other => {
                warn!(action_type = %other, "No responder registered for action type");
                Err(AgentError::unsupported_action(other))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mocks::{MockExaminationResponder, MockPatientResponder};

    fn mock_gatekeeper() -> Gatekeeper {
        Gatekeeper::with_responders(
            Arc::new(MockPatientResponder::with_reply("mock answer")),
            Arc::new(MockExaminationResponder::with_reply("mock result")),
        )
    }

    #[test]
    fn test_broad_question_rejected() {
        let gatekeeper = mock_gatekeeper();
        let action = AgentAction::ask_question("Tell me everything about this patient");

        let (ok, message) = gatekeeper.validate_request(&action);
        assert!(!ok);
        assert_eq!(message, SPECIFIC_QUESTION_GUIDANCE);
    }

    #[test]
    fn test_specific_question_passes() {
        let gatekeeper = mock_gatekeeper();
        let action = AgentAction::ask_question("Does the patient have a fever?");

        let (ok, message) = gatekeeper.validate_request(&action);
        assert!(ok);
        assert!(message.is_empty());
    }

    #[test]
    fn test_broad_phrase_matches_case_insensitively() {
        let gatekeeper = mock_gatekeeper();
        for content in [
            "TELL ME EVERYTHING",
            "So, What's Wrong with her?",
            "what SHOULD i DO next",
        ] {
            let (ok, _) = gatekeeper.validate_request(&AgentAction::ask_question(content));
            assert!(!ok, "expected rejection for {content:?}");
        }
    }

    #[test]
    fn test_broad_phrase_matches_as_substring() {
        let gatekeeper = mock_gatekeeper();
        let action =
            AgentAction::ask_question("Before we start, could you summarize the case for me?");

        let (ok, _) = gatekeeper.validate_request(&action);
        assert!(!ok);
    }

    #[test]
    fn test_vague_test_rejected() {
        let gatekeeper = mock_gatekeeper();
        let action = AgentAction::request_test("order labs");

        let (ok, message) = gatekeeper.validate_request(&action);
        assert!(!ok);
        assert_eq!(message, SPECIFIC_TEST_GUIDANCE);
    }

    #[test]
    fn test_specific_test_passes() {
        let gatekeeper = mock_gatekeeper();
        let action = AgentAction::request_test("Complete Blood Count");

        let (ok, message) = gatekeeper.validate_request(&action);
        assert!(ok);
        assert!(message.is_empty());
    }

    #[test]
    fn test_blank_content_rejected_for_known_types() {
        let gatekeeper = mock_gatekeeper();

        let (ok, message) = gatekeeper.validate_request(&AgentAction::ask_question("   "));
        assert!(!ok);
        assert_eq!(message, EMPTY_QUESTION_GUIDANCE);

        let (ok, message) = gatekeeper.validate_request(&AgentAction::request_test(""));
        assert!(!ok);
        assert_eq!(message, EMPTY_TEST_GUIDANCE);
    }

    #[test]
    fn test_unhandled_action_type_passes_validation() {
        let gatekeeper = mock_gatekeeper();
        let action = AgentAction {
            action_type: ActionType::Diagnose,
            content: "acute appendicitis".to_string(),
        };

        let (ok, message) = gatekeeper.validate_request(&action);
        assert!(ok);
        assert!(message.is_empty());
    }

    #[test]
    fn test_composite_model_identifier() {
        let gatekeeper = Gatekeeper::with_responders(
            Arc::new(MockPatientResponder::with_reply("a").with_model("model-a")),
            Arc::new(MockExaminationResponder::with_reply("b").with_model("model-b")),
        );

        assert_eq!(gatekeeper.model(), "patient=model-a, exam=model-b");
    }
}
