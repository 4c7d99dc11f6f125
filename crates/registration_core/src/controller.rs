//! Form controller: field state, validation gate and submission lifecycle.
//!
//! ```text
//! Editing --begin_submit(valid)--> Submitting --complete(ok)--> Succeeded
//! Editing --begin_submit(valid)--> Submitting --complete(fail)--> Editing
//! Editing --begin_submit(invalid)--> Editing
//! ```

use std::collections::VecDeque;

use shared::domain::{FormField, RegistrationInput};
use tracing::{debug, info, warn};

use crate::{
    endpoint::{RegistrationEndpoint, RegistrationReceipt},
    error::RegistrationError,
    validation::{validate, ErrorKey, ValidationErrors},
};

pub const INCOMPLETE_FORM_MESSAGE: &str = "Por favor complete todos los campos requeridos";
pub const SUCCESS_MESSAGE: &str = "¡Registro exitoso!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Editing,
    Submitting,
    /// Terminal for the lifetime of the controller.
    Succeeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success {
        registration_code: String,
        message: Option<String>,
    },
    Failure {
        message: String,
    },
}

impl SubmissionResult {
    pub fn from_outcome(outcome: Result<RegistrationReceipt, RegistrationError>) -> Self {
        match outcome {
            Ok(receipt) => SubmissionResult::Success {
                registration_code: receipt.code,
                message: receipt.message,
            },
            Err(err) => {
                warn!(category = err.category(), "registration failed: {err}");
                SubmissionResult::Failure {
                    message: err.user_message(),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient notification (toast) waiting to be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct FormController {
    input: RegistrationInput,
    errors: ValidationErrors,
    terms_accepted: bool,
    phase: Phase,
    registration_code: Option<String>,
    notices: VecDeque<Notice>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn value(&self, field: FormField) -> &str {
        self.input.get(field)
    }

    pub fn input(&self) -> &RegistrationInput {
        &self.input
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, key: impl Into<ErrorKey>) -> Option<&str> {
        self.errors.get(key)
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// Only populated once the phase is `Succeeded`.
    pub fn registration_code(&self) -> Option<&str> {
        self.registration_code.as_deref()
    }

    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Editing
    }

    /// Evaluates the current values without touching the stored error map.
    pub fn validate(&self) -> ValidationErrors {
        validate(&self.input, self.terms_accepted)
    }

    /// Stores `value` verbatim and drops a stale error for that field only.
    pub fn on_field_change(&mut self, field: FormField, value: impl Into<String>) {
        if self.phase == Phase::Succeeded {
            return;
        }
        self.input.set(field, value);
        self.errors.clear(field);
    }

    pub fn on_terms_toggle(&mut self, accepted: bool) {
        if self.phase == Phase::Succeeded {
            return;
        }
        self.terms_accepted = accepted;
        self.errors.clear(ErrorKey::Terms);
    }

    /// First half of a submission.
    ///
    /// Returns the snapshot to send when the form is valid and the phase moved
    /// to `Submitting`. Returns `None` when nothing must be sent: the form is
    /// invalid, or a submission is already in flight or succeeded.
    pub fn begin_submit(&mut self) -> Option<RegistrationInput> {
        if self.phase != Phase::Editing {
            debug!(phase = ?self.phase, "ignoring submit outside of editing");
            return None;
        }

        self.errors = self.validate();
        if !self.errors.is_valid() {
            debug!(errors = self.errors.len(), "registration form incomplete");
            self.notices.push_back(Notice::error(INCOMPLETE_FORM_MESSAGE));
            return None;
        }

        self.phase = Phase::Submitting;
        info!("registration submission started");
        Some(self.input.clone())
    }

    /// Second half of a submission. Ignored unless a submission is in flight.
    pub fn complete_submit(&mut self, result: SubmissionResult) {
        if self.phase != Phase::Submitting {
            warn!(phase = ?self.phase, "dropping submission result with no submission in flight");
            return;
        }

        match result {
            SubmissionResult::Success {
                registration_code, ..
            } => {
                info!("registration succeeded");
                self.registration_code = Some(registration_code);
                self.phase = Phase::Succeeded;
                self.notices.push_back(Notice::success(SUCCESS_MESSAGE));
            }
            SubmissionResult::Failure { message } => {
                self.phase = Phase::Editing;
                self.notices.push_back(Notice::error(message));
            }
        }
    }

    /// Validates, sends one request through `endpoint`, and applies the result.
    ///
    /// Returns `None` when no request was issued.
    pub async fn submit<E>(&mut self, endpoint: &E) -> Option<SubmissionResult>
    where
        E: RegistrationEndpoint + ?Sized,
    {
        let input = self.begin_submit()?;
        let result = SubmissionResult::from_outcome(endpoint.register(&input).await);
        self.complete_submit(result.clone());
        Some(result)
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
