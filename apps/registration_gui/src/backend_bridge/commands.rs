//! Backend commands queued from UI to backend worker.

use shared::domain::RegistrationInput;

#[derive(Debug)]
pub enum BackendCommand {
    Submit { input: RegistrationInput },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit { .. } => "submit_registration",
        }
    }
}
