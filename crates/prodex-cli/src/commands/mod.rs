//! Command implementations for the prodex CLI.
//!
//! - [`trace`] - follow the dependency chain from entry files

pub mod trace;

pub use trace::execute as trace_execute;
