//! Integration tests for gatekeeper dispatch
//!
//! Verifies that actions are forwarded to exactly one responder with their
//! content and case intact, and that unroutable action types fail without
//! touching either responder.

use clinsim::protocol::{ActionType, AgentAction, CaseFile, ResponseType};
use clinsim::routing::Gatekeeper;
use clinsim::testing::mocks::{MockExaminationResponder, MockPatientResponder};
use clinsim::AgentError;
use std::sync::Arc;

fn sample_case() -> CaseFile {
    CaseFile::new(
        "29F with abdominal pain",
        "29-year-old woman, two days of right lower quadrant pain.",
    )
}

#[tokio::test]
async fn test_question_routed_to_patient_responder() {
    let patient = Arc::new(MockPatientResponder::with_reply("No fever reported."));
    let examination = Arc::new(MockExaminationResponder::with_reply("unused"));
    let gatekeeper = Gatekeeper::with_responders(patient.clone(), examination.clone());

    let case = sample_case();
    let action = AgentAction::ask_question("Does the patient have a fever?");

    let response = gatekeeper.process_action(&action, &case).await.unwrap();

    assert_eq!(response.response_type, ResponseType::Answer);
    assert_eq!(response.content, "No fever reported.");
    assert_eq!(response.model, "mock-patient");

    // Exactly the action content and case were forwarded
    let questions = patient.received_questions().await;
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].0, "Does the patient have a fever?");
    assert_eq!(questions[0].1, case.case_id);

    // The examination responder was never consulted
    assert!(examination.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_test_request_routed_to_examination_responder() {
    let patient = Arc::new(MockPatientResponder::with_reply("unused"));
    let examination = Arc::new(MockExaminationResponder::with_reply(
        "No free fluid; appendix dilated to 9mm.",
    ));
    let gatekeeper = Gatekeeper::with_responders(patient.clone(), examination.clone());

    let case = sample_case();
    let action = AgentAction::request_test("CT of the abdomen with contrast");

    let response = gatekeeper.process_action(&action, &case).await.unwrap();

    assert_eq!(response.response_type, ResponseType::TestResult);
    assert_eq!(response.content, "No free fluid; appendix dilated to 9mm.");
    assert_eq!(response.model, "mock-exam");

    let requests = examination.received_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "CT of the abdomen with contrast");
    assert_eq!(requests[0].1, case.case_id);

    assert!(patient.received_questions().await.is_empty());
}

#[tokio::test]
async fn test_unhandled_action_type_fails_dispatch() {
    let patient = Arc::new(MockPatientResponder::with_reply("unused"));
    let examination = Arc::new(MockExaminationResponder::with_reply("unused"));
    let gatekeeper = Gatekeeper::with_responders(patient.clone(), examination.clone());

    let action = AgentAction {
        action_type: ActionType::Diagnose,
        content: "acute appendicitis".to_string(),
    };

    let result = gatekeeper.process_action(&action, &sample_case()).await;

    let error = result.unwrap_err();
    assert!(matches!(
        error,
        AgentError::UnsupportedAction {
            action_type: ActionType::Diagnose
        }
    ));
    assert_eq!(
        error.to_string(),
        "Gatekeeper cannot process action type: DIAGNOSE"
    );

    // Neither responder was invoked
    assert!(patient.received_questions().await.is_empty());
    assert!(examination.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_responder_error_propagates_unchanged() {
    let gatekeeper = Gatekeeper::with_responders(
        Arc::new(MockPatientResponder::with_failure()),
        Arc::new(MockExaminationResponder::with_reply("unused")),
    );

    let action = AgentAction::ask_question("Does the patient smoke?");
    let result = gatekeeper.process_action(&action, &sample_case()).await;

    let error = result.unwrap_err();
    assert!(matches!(error, AgentError::InternalError { .. }));
    assert!(error.to_string().contains("Mock patient failure"));
}

#[tokio::test]
async fn test_process_does_not_enforce_validation() {
    // Validation is a side-gate callers invoke explicitly; a broad question
    // that skips it is still dispatched.
    let patient = Arc::new(MockPatientResponder::with_reply("answer anyway"));
    let gatekeeper = Gatekeeper::with_responders(
        patient.clone(),
        Arc::new(MockExaminationResponder::with_reply("unused")),
    );

    let action = AgentAction::ask_question("Tell me everything about this patient");
    let (ok, _) = gatekeeper.validate_request(&action);
    assert!(!ok);

    let response = gatekeeper
        .process_action(&action, &sample_case())
        .await
        .unwrap();
    assert_eq!(response.content, "answer anyway");
    assert_eq!(patient.received_questions().await.len(), 1);
}

#[tokio::test]
async fn test_gatekeeper_is_stateless_across_calls() {
    let patient = Arc::new(MockPatientResponder::with_reply("answer"));
    let examination = Arc::new(MockExaminationResponder::with_reply("result"));
    let gatekeeper = Gatekeeper::with_responders(patient.clone(), examination.clone());

    let case_a = sample_case();
    let case_b = CaseFile::new("62M with chest pain", "62-year-old man, crushing chest pain.");

    gatekeeper
        .process_action(&AgentAction::ask_question("Any nausea?"), &case_a)
        .await
        .unwrap();
    gatekeeper
        .process_action(&AgentAction::request_test("Troponin I"), &case_b)
        .await
        .unwrap();
    gatekeeper
        .process_action(&AgentAction::ask_question("Any radiation of the pain?"), &case_b)
        .await
        .unwrap();

    let questions = patient.received_questions().await;
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].1, case_a.case_id);
    assert_eq!(questions[1].1, case_b.case_id);

    let requests = examination.received_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1, case_b.case_id);
}
