//! Backend bridge: commands queued by the UI and the worker that runs them.

pub mod commands;
pub mod runtime;
