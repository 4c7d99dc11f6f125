//! Outbound call to the external registration endpoint.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use shared::{
    domain::RegistrationInput,
    error::ErrorBody,
    protocol::{RegistrationRequest, RegistrationResponse},
};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::{config::Settings, error::RegistrationError};

/// What the endpoint hands back for an accepted registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub code: String,
    pub message: Option<String>,
}

impl From<RegistrationResponse> for RegistrationReceipt {
    fn from(response: RegistrationResponse) -> Self {
        Self {
            code: response.code,
            message: response.message,
        }
    }
}

#[async_trait]
pub trait RegistrationEndpoint: Send + Sync {
    async fn register(
        &self,
        input: &RegistrationInput,
    ) -> Result<RegistrationReceipt, RegistrationError>;
}

#[derive(Debug, Clone)]
pub struct HttpRegistrationEndpoint {
    http: Client,
    endpoint_url: Url,
}

impl HttpRegistrationEndpoint {
    pub fn new(endpoint_url: Url) -> Self {
        Self::with_client(Client::new(), endpoint_url)
    }

    pub fn with_client(http: Client, endpoint_url: Url) -> Self {
        Self { http, endpoint_url }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.endpoint_url.clone())
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }
}

#[async_trait]
impl RegistrationEndpoint for HttpRegistrationEndpoint {
    async fn register(
        &self,
        input: &RegistrationInput,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        debug!(endpoint = %self.endpoint_url, "posting registration");
        let response = self
            .http
            .post(self.endpoint_url.clone())
            .header(ACCEPT, "application/json")
            .json(&RegistrationRequest::from(input))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        info!(status = status.as_u16(), "registration endpoint responded");
        interpret_response(status, &body)
    }
}

/// Maps a raw status/body pair onto a receipt or a typed failure.
///
/// A success status only counts when the body carries a non-blank string
/// `codigo`. Fields are read one by one, so a malformed `mensaje` never hides
/// an issued code. Bodies that are not JSON at all are decode failures.
pub(crate) fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> Result<RegistrationReceipt, RegistrationError> {
    let value: Value = serde_json::from_slice(body)?;
    let message = string_field(&value, "mensaje");

    if status.is_success() {
        if let Some(code) = string_field(&value, "codigo").filter(|code| !code.trim().is_empty())
        {
            return Ok(RegistrationResponse { code, message }.into());
        }
        warn!(
            status = status.as_u16(),
            "success status without a participation code"
        );
    }

    let error_body = ErrorBody { message };
    Err(RegistrationError::Application {
        status: status.as_u16(),
        message: error_body.message().map(str::to_string),
    })
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
#[path = "tests/endpoint_tests.rs"]
mod tests;
