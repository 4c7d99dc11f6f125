//! Headless registration form: field state, validation, the submission
//! lifecycle and the outbound call to the registration endpoint.

pub mod config;
pub mod controller;
pub mod endpoint;
pub mod error;
pub mod terms;
pub mod validation;

pub use controller::{FormController, Notice, NoticeKind, Phase, SubmissionResult};
pub use endpoint::{HttpRegistrationEndpoint, RegistrationEndpoint, RegistrationReceipt};
pub use error::RegistrationError;
pub use shared::domain::{FormField, RegistrationInput};
pub use terms::{TermsContent, TermsDisclosure};
pub use validation::{validate, ErrorKey, ValidationErrors};
