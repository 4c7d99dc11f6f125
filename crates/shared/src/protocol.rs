use serde::{Deserialize, Serialize};

use crate::domain::RegistrationInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
}

impl From<&RegistrationInput> for RegistrationRequest {
    fn from(input: &RegistrationInput) -> Self {
        Self {
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
        }
    }
}

/// Success body: a participation code and an optional message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(default, rename = "mensaje", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormField;

    #[test]
    fn request_uses_fixed_wire_keys() {
        let input = RegistrationInput {
            full_name: "Ana Pérez".to_string(),
            email: "ana@example.com".to_string(),
            phone: "999".to_string(),
            address: "Av. Lima 123".to_string(),
        };
        let value = serde_json::to_value(RegistrationRequest::from(&input)).expect("serialize");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 4);
        for field in FormField::ALL {
            assert_eq!(object[field.wire_key()], input.get(field));
        }
    }

    #[test]
    fn response_message_is_optional() {
        let parsed: RegistrationResponse =
            serde_json::from_str(r#"{"codigo":"ABC123"}"#).expect("parse");
        assert_eq!(parsed.code, "ABC123");
        assert_eq!(parsed.message, None);
    }
}
