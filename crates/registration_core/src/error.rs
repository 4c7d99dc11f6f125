use thiserror::Error;

/// Shown when the endpoint rejects a request without explaining why.
pub const APPLICATION_FALLBACK_MESSAGE: &str = "Error en el registro";

/// Shown for failures that never produced a usable response.
pub const TRANSPORT_FALLBACK_MESSAGE: &str =
    "Hubo un error al procesar tu registro. Por favor intenta nuevamente.";

#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The endpoint answered but reported a failure.
    #[error("registration rejected (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Application {
        status: u16,
        message: Option<String>,
    },
    #[error("registration endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed registration response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RegistrationError {
    /// Text surfaced to the user. Transport details are never leaked.
    pub fn user_message(&self) -> String {
        match self {
            RegistrationError::Application {
                message: Some(message),
                ..
            } => message.clone(),
            RegistrationError::Application { message: None, .. } => {
                APPLICATION_FALLBACK_MESSAGE.to_string()
            }
            RegistrationError::Transport(_) | RegistrationError::Decode(_) => {
                TRANSPORT_FALLBACK_MESSAGE.to_string()
            }
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            RegistrationError::Application { .. } => "application",
            RegistrationError::Transport(_) => "transport",
            RegistrationError::Decode(_) => "decode",
        }
    }
}
