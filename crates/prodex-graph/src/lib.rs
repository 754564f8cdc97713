//! # prodex-graph
//!
//! Dependency resolution engine for prodex.
//!
//! Starting from a set of entry files, the engine extracts import-like
//! specifiers from JS/TS and PHP sources, maps each one to a file through
//! relative paths, build-tool aliases and PSR-4 namespaces, and walks the
//! resulting graph with cycle avoidance, a depth bound and a global size cap.
//!
//! ## Overview
//!
//! ```text
//!  entries ──► DependencyWalker ──► extract ──► resolver ──► files + stats
//!                    │                             │
//!                    └──── ResolutionContext ◄─────┘
//!                 (visited states, tables, caches)
//! ```
//!
//! - [`extract`]: raw specifiers from file text (oxc scan with regex fallback
//!   for JS, patterns for PHP).
//! - [`resolver`]: alias tables, namespace maps, bindings and probing.
//! - [`ExcludeMatcher`]: glob predicate over specifiers and paths.
//! - [`DependencyWalker`]: the traversal itself.
//! - [`include`]: glob scanning for always-included files and entry globs.
//!
//! All filesystem access goes through the [`Runtime`] trait;
//! [`NativeRuntime`] is the `std::fs` implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prodex_config::ProdexConfig;
//! use prodex_graph::follow_chain;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = ProdexConfig::with_root("/project");
//! config.resolve.depth = 3;
//!
//! let result = follow_chain(&[PathBuf::from("resources/js/app.ts")], &config).await?;
//! for file in &result.files {
//!     println!("{}", file.display());
//! }
//! println!(
//!     "expected {}, resolved {}",
//!     result.stats.expected_count(),
//!     result.stats.resolved_count()
//! );
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod exclude;
pub mod extract;
pub mod include;
pub mod language;
pub mod resolver;
pub mod runtime;
pub mod stats;
pub mod walker;

#[cfg(test)]
mod tests;

pub use context::{ResolutionContext, VisitState};
pub use exclude::{ExcludeMatcher, PatternError};
pub use extract::{ScanError, ScanStrategy, Specifiers, extract_specifiers};
pub use include::{apply_includes, scan_globs};
pub use language::Language;
pub use resolver::{AliasTable, BindingMap, NamespaceMap};
pub use runtime::native::NativeRuntime;
pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
pub use stats::ResolveStats;
pub use walker::{DependencyWalker, ResolverResult, TraceResult, WalkerError, follow_chain};

#[cfg(any(test, feature = "test-utils"))]
pub use runtime::test_utils::TestRuntime;
