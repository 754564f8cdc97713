//! Configuration for prodex dependency tracing.
//!
//! A run is driven by one immutable [`ProdexConfig`], produced by merging
//! built-in defaults, the project's `prodex.json`, `PRODEX_*` environment
//! variables, and run-time overrides (in that order of precedence) before
//! traversal starts.

pub mod config;
pub mod discovery;
pub mod error;

pub use config::*;
pub use discovery::{ConfigDiscovery, discover, CONFIG_FILE_NAME, ENV_PREFIX};
pub use error::*;
