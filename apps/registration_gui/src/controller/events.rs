//! Backend-to-UI events and error modeling for the registration window.

use registration_core::SubmissionResult;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    SubmissionFinished(SubmissionResult),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    /// Whether the backend worker is gone and no submission can succeed.
    pub fn is_fatal_to_backend(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
