//! Process-level services: logging and terminal state

pub mod terminal_modes;
pub mod tracing_setup;
