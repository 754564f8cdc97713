//! prodex CLI - trace the local dependency graph of a source tree.
//!
//! A thin consumer of `prodex-graph`: it loads the layered configuration,
//! expands entry globs, runs the walker and prints the traced file list
//! with an import summary.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - command implementations
//! - [`error`] - `CliError` and miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and the import summary
//!
//! # Example
//!
//! ```rust,no_run
//! use prodex_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
