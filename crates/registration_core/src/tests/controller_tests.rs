use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{error::TRANSPORT_FALLBACK_MESSAGE, validation::TERMS_REQUIRED_MESSAGE};

enum Script {
    Accept(&'static str),
    Reject(Option<&'static str>),
    Garbled,
}

struct ScriptedEndpoint {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedEndpoint {
    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistrationEndpoint for ScriptedEndpoint {
    async fn register(
        &self,
        _input: &RegistrationInput,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Accept(code) => Ok(RegistrationReceipt {
                code: code.to_string(),
                message: Some("ok".to_string()),
            }),
            Script::Reject(message) => Err(RegistrationError::Application {
                status: 400,
                message: message.map(str::to_string),
            }),
            Script::Garbled => Err(serde_json::from_str::<serde_json::Value>("<html>")
                .expect_err("not json")
                .into()),
        }
    }
}

fn filled_controller() -> FormController {
    let mut controller = FormController::new();
    controller.on_field_change(FormField::FullName, "Ana Pérez");
    controller.on_field_change(FormField::Email, "ana@example.com");
    controller.on_field_change(FormField::Phone, "+51 999 999 999");
    controller.on_field_change(FormField::Address, "Av. Lima 123");
    controller.on_terms_toggle(true);
    controller
}

#[test]
fn starts_editing_with_empty_state() {
    let controller = FormController::new();
    assert_eq!(controller.phase(), Phase::Editing);
    assert!(controller.can_submit());
    assert!(controller.errors().is_valid());
    assert!(!controller.terms_accepted());
    assert_eq!(controller.registration_code(), None);
}

#[test]
fn validate_does_not_store_errors() {
    let controller = FormController::new();
    assert_eq!(controller.validate().len(), 5);
    assert!(controller.errors().is_valid());
}

#[tokio::test]
async fn blank_field_blocks_submission_without_network_call() {
    for field in FormField::ALL {
        let mut controller = filled_controller();
        controller.on_field_change(field, "   ");
        let endpoint = ScriptedEndpoint::new(Script::Accept("ABC123"));

        assert_eq!(controller.submit(&endpoint).await, None);
        assert_eq!(endpoint.calls(), 0);
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(controller.errors().len(), 1);
        assert_eq!(controller.error_for(field), Some(field.required_message()));
        assert_eq!(
            controller.drain_notices(),
            vec![Notice {
                kind: NoticeKind::Error,
                message: INCOMPLETE_FORM_MESSAGE.to_string(),
            }]
        );
    }
}

#[test]
fn unaccepted_terms_block_submission() {
    let mut controller = filled_controller();
    controller.on_terms_toggle(false);
    assert_eq!(controller.begin_submit(), None);
    assert_eq!(
        controller.error_for(ErrorKey::Terms),
        Some(TERMS_REQUIRED_MESSAGE)
    );
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let mut controller = FormController::new();
    assert_eq!(controller.begin_submit(), None);
    assert_eq!(controller.errors().len(), 5);

    controller.on_field_change(FormField::Email, "a");
    assert!(!controller.errors().contains(FormField::Email));
    assert_eq!(controller.errors().len(), 4);
    for field in [FormField::FullName, FormField::Phone, FormField::Address] {
        assert!(controller.errors().contains(field));
    }
    assert!(controller.errors().contains(ErrorKey::Terms));
}

#[test]
fn clearing_a_field_does_not_revalidate_it() {
    let mut controller = filled_controller();
    controller.on_field_change(FormField::Phone, "");
    assert!(controller.errors().is_valid());
}

#[test]
fn toggling_terms_clears_terms_error_only() {
    let mut controller = FormController::new();
    controller.begin_submit();
    controller.on_terms_toggle(true);
    assert!(!controller.errors().contains(ErrorKey::Terms));
    assert_eq!(controller.errors().len(), 4);
}

#[test]
fn field_values_are_stored_verbatim() {
    let mut controller = FormController::new();
    controller.on_field_change(FormField::FullName, "  Ana  ");
    assert_eq!(controller.value(FormField::FullName), "  Ana  ");
}

#[tokio::test]
async fn successful_submission_reaches_terminal_phase() {
    let mut controller = filled_controller();
    let endpoint = ScriptedEndpoint::new(Script::Accept("ABC123"));

    let result = controller.submit(&endpoint).await.expect("request issued");

    assert!(result.is_success());
    assert_eq!(endpoint.calls(), 1);
    assert_eq!(controller.phase(), Phase::Succeeded);
    assert_eq!(controller.registration_code(), Some("ABC123"));
    assert!(!controller.can_submit());
    assert_eq!(
        controller.drain_notices(),
        vec![Notice {
            kind: NoticeKind::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }]
    );
}

#[tokio::test]
async fn rejection_surfaces_endpoint_message_and_returns_to_editing() {
    let mut controller = filled_controller();
    let endpoint = ScriptedEndpoint::new(Script::Reject(Some("Email inválido")));

    let result = controller.submit(&endpoint).await.expect("request issued");

    assert_eq!(
        result,
        SubmissionResult::Failure {
            message: "Email inválido".to_string()
        }
    );
    assert_eq!(controller.phase(), Phase::Editing);
    assert!(controller.can_submit());
    assert_eq!(controller.registration_code(), None);
    let notices = controller.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(notices[0].message, "Email inválido");
}

#[tokio::test]
async fn unreadable_response_surfaces_generic_message() {
    let mut controller = filled_controller();
    let endpoint = ScriptedEndpoint::new(Script::Garbled);

    controller.submit(&endpoint).await.expect("request issued");

    assert_eq!(controller.phase(), Phase::Editing);
    let notices = controller.drain_notices();
    assert_eq!(notices[0].message, TRANSPORT_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn failed_submission_can_be_retried() {
    let mut controller = filled_controller();
    let rejecting = ScriptedEndpoint::new(Script::Reject(None));
    controller.submit(&rejecting).await.expect("request issued");
    assert_eq!(controller.phase(), Phase::Editing);

    let accepting = ScriptedEndpoint::new(Script::Accept("XYZ789"));
    controller.submit(&accepting).await.expect("request issued");
    assert_eq!(controller.phase(), Phase::Succeeded);
    assert_eq!(controller.registration_code(), Some("XYZ789"));
}

#[tokio::test]
async fn submit_while_submitting_is_a_no_op() {
    let mut controller = filled_controller();
    let snapshot = controller.begin_submit().expect("valid form");
    assert_eq!(snapshot.full_name, "Ana Pérez");
    assert_eq!(controller.phase(), Phase::Submitting);
    assert!(!controller.can_submit());

    assert_eq!(controller.begin_submit(), None);
    let endpoint = ScriptedEndpoint::new(Script::Accept("ABC123"));
    assert_eq!(controller.submit(&endpoint).await, None);
    assert_eq!(endpoint.calls(), 0);
    assert_eq!(controller.phase(), Phase::Submitting);
    assert!(controller.drain_notices().is_empty());
}

#[test]
fn stray_result_is_ignored_while_editing() {
    let mut controller = filled_controller();
    controller.complete_submit(SubmissionResult::Success {
        registration_code: "ABC123".to_string(),
        message: None,
    });
    assert_eq!(controller.phase(), Phase::Editing);
    assert_eq!(controller.registration_code(), None);
}

#[test]
fn succeeded_phase_ignores_further_edits() {
    let mut controller = filled_controller();
    controller.begin_submit().expect("valid form");
    controller.complete_submit(SubmissionResult::Success {
        registration_code: "ABC123".to_string(),
        message: None,
    });

    controller.on_field_change(FormField::Email, "");
    controller.on_terms_toggle(false);
    assert_eq!(controller.begin_submit(), None);

    assert_eq!(controller.phase(), Phase::Succeeded);
    assert_eq!(controller.value(FormField::Email), "ana@example.com");
    assert!(controller.terms_accepted());
    assert_eq!(controller.registration_code(), Some("ABC123"));
}
