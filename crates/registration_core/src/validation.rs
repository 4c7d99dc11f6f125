use std::collections::BTreeMap;

use shared::domain::{FormField, RegistrationInput};

pub const TERMS_REQUIRED_MESSAGE: &str = "Debe aceptar los términos y condiciones";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    Field(FormField),
    Terms,
}

impl From<FormField> for ErrorKey {
    fn from(field: FormField) -> Self {
        ErrorKey::Field(field)
    }
}

/// Per-field messages. A missing key means that field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: BTreeMap<ErrorKey, String>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&str> {
        self.entries.get(&key.into()).map(String::as_str)
    }

    pub fn contains(&self, key: impl Into<ErrorKey>) -> bool {
        self.entries.contains_key(&key.into())
    }

    pub fn insert(&mut self, key: impl Into<ErrorKey>, message: impl Into<String>) {
        self.entries.insert(key.into(), message.into());
    }

    /// Removes the entry for `key`, returning whether one was present.
    pub fn clear(&mut self, key: impl Into<ErrorKey>) -> bool {
        self.entries.remove(&key.into()).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &str)> {
        self.entries.iter().map(|(key, message)| (*key, message.as_str()))
    }
}

/// Checks every required field and the terms flag.
pub fn validate(input: &RegistrationInput, terms_accepted: bool) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in FormField::ALL {
        if input.get(field).trim().is_empty() {
            errors.insert(field, field.required_message());
        }
    }
    if !terms_accepted {
        errors.insert(ErrorKey::Terms, TERMS_REQUIRED_MESSAGE);
    }
    errors
}
