//! Terms and conditions disclosure.
//!
//! The disclosure only reads its own visibility flag. Accepting the terms is
//! a separate checkbox owned by [`crate::FormController`]; opening or closing
//! the disclosure never changes it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermsClause {
    pub text: &'static str,
    pub details: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermsContent {
    pub title: &'static str,
    pub intro: &'static str,
    pub clauses: &'static [TermsClause],
    pub close_label: &'static str,
}

const fn clause(text: &'static str) -> TermsClause {
    TermsClause { text, details: &[] }
}

pub static TERMS: TermsContent = TermsContent {
    title: "Términos y Condiciones del Sorteo",
    intro: "Al participar en este sorteo, usted acepta las siguientes condiciones:",
    clauses: &[
        clause("Debe ser mayor de edad (18 años o más) para participar."),
        clause("Los datos proporcionados serán utilizados exclusivamente para los fines del sorteo."),
        TermsClause {
            text: "Autoriza el uso de sus datos personales para:",
            details: &[
                "Contacto en caso de resultar ganador",
                "Verificación de identidad",
                "Entrega de premios",
            ],
        },
        clause("Sus datos serán tratados con confidencialidad y no serán compartidos con terceros."),
        clause("El ganador será contactado a través de los datos proporcionados."),
    ],
    close_label: "Cerrar",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermsDisclosure {
    visible: bool,
}

impl TermsDisclosure {
    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> &'static TermsContent {
        &TERMS
    }
}
