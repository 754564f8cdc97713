//! Error handling for the prodex CLI.
//!
//! Library errors from `prodex-config` and `prodex-graph` convert into
//! [`CliError`] via `#[from]`; `main` renders the result through miette.
//!
//! # Example
//!
//! ```rust,no_run
//! use prodex_cli::error::{CliError, Result};
//! use std::path::Path;
//!
//! fn require_dir(path: &Path) -> Result<()> {
//!     if !path.is_dir() {
//!         return Err(CliError::FileNotFound(path.to_path_buf()));
//!     }
//!     Ok(())
//! }
//! ```

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

use prodex_config::ConfigError;
use prodex_graph::{PatternError, WalkerError};

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or merging `prodex.json` failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The walker refused to start
    #[error("Trace error: {0}")]
    Walker(#[from] WalkerError),

    /// An entry or include glob failed to compile
    #[error("{0}")]
    Pattern(#[from] PatternError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_from_config_error() {
        let err: CliError = ConfigError::NotFound.into();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: config not found");
    }

    #[test]
    fn test_cli_error_from_walker_error() {
        let err: CliError = WalkerError::NoEntries.into();
        assert!(matches!(err, CliError::Walker(WalkerError::NoEntries)));
        assert!(err.to_string().contains("No entry files given"));
    }

    #[test]
    fn test_file_not_found_shows_path() {
        let err = CliError::FileNotFound(PathBuf::from("missing/root"));
        assert!(err.to_string().contains("missing/root"));
    }
}
