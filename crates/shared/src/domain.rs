use serde::{Deserialize, Serialize};

/// The four free-text inputs of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FullName,
    Email,
    Phone,
    Address,
}

impl FormField {
    /// Display order of the form.
    pub const ALL: [FormField; 4] = [
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::Address,
    ];

    /// Key used for this field in the outbound JSON body.
    pub fn wire_key(self) -> &'static str {
        match self {
            FormField::FullName => "nombreCompleto",
            FormField::Email => "email",
            FormField::Phone => "telefono",
            FormField::Address => "direccion",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::FullName => "Nombres y Apellidos",
            FormField::Email => "Correo electrónico",
            FormField::Phone => "Teléfono",
            FormField::Address => "Dirección",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::FullName => "Ingrese sus nombres y apellidos completos",
            FormField::Email => "correo@ejemplo.com",
            FormField::Phone => "+51 999 999 999",
            FormField::Address => "Ingrese su dirección completa",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            FormField::FullName => "Se requiere nombres y apellidos",
            FormField::Email => "Se requiere correo electrónico",
            FormField::Phone => "Se requiere teléfono",
            FormField::Address => "Se requiere dirección",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, FormField::Address)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl RegistrationInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Address => &self.address,
        }
    }

    /// Stores `value` verbatim; trimming only happens during validation.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Address => &mut self.address,
        };
        *slot = value.into();
    }
}
