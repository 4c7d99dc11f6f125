//! UI layer: registration window, terms disclosure and notices.

pub mod app;
pub mod terms;

pub use app::RegistrationApp;
