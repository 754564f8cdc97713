//! Dependency walker.
//!
//! Expands the import graph depth-first from a set of entry files using an
//! explicit work-list. Each file moves through
//! `Unvisited → Visiting → Done` in the run's [`ResolutionContext`], so a
//! file reached twice (a cycle, or a second entry) contributes once.
//!
//! ```rust,no_run
//! use prodex_config::ProdexConfig;
//! use prodex_graph::{DependencyWalker, NativeRuntime};
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<(), prodex_graph::WalkerError> {
//! let config = ProdexConfig::with_root("/project");
//! let walker = DependencyWalker::new(config);
//! let result = walker
//!     .follow_chain(&[PathBuf::from("src/main.ts")], &NativeRuntime)
//!     .await?;
//! println!("{} files, {} missing", result.files.len(), result.stats.missing_count());
//! # Ok(())
//! # }
//! ```

mod traversal;

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use prodex_config::ProdexConfig;
use serde::Serialize;

use crate::context::ResolutionContext;
use crate::exclude::PatternError;
use crate::language::Language;
use crate::runtime::Runtime;
use crate::runtime::native::NativeRuntime;
use crate::stats::ResolveStats;

use traversal::Traversal;

/// Conditions that stop a run before traversal begins.
#[derive(Debug, thiserror::Error)]
pub enum WalkerError {
    #[error("No entry files given")]
    NoEntries,

    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
}

/// Files and stats contributed by one file's subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverResult {
    /// Resolved files in discovery order, without duplicates.
    pub files: Vec<PathBuf>,
    pub stats: ResolveStats,
}

/// Outcome of a full run over all entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceResult {
    /// Entries and everything they reach, in discovery order.
    pub files: Vec<PathBuf>,
    pub stats: ResolveStats,
    /// The size cap left files or specifiers unvisited.
    pub truncated: bool,
}

/// Walks the dependency graph of one configured project.
#[derive(Debug, Clone)]
pub struct DependencyWalker {
    config: ProdexConfig,
}

impl DependencyWalker {
    pub fn new(config: ProdexConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProdexConfig {
        &self.config
    }

    /// Build a fresh run context.
    pub fn context(&self) -> Result<ResolutionContext, WalkerError> {
        Ok(ResolutionContext::new(self.config.clone())?)
    }

    /// Trace every entry with a shared visited set and stats.
    ///
    /// Entries are resolved against the root. The run stops without error
    /// once the emitted file count reaches `resolve.limit`.
    pub async fn follow_chain(
        &self,
        entries: &[PathBuf],
        runtime: &dyn Runtime,
    ) -> Result<TraceResult, WalkerError> {
        if entries.is_empty() {
            return Err(WalkerError::NoEntries);
        }
        let ctx = self.context()?;
        Ok(self.follow_chain_in(entries, &ctx, runtime).await)
    }

    /// [`follow_chain`](Self::follow_chain) inside an existing context.
    pub async fn follow_chain_in(
        &self,
        entries: &[PathBuf],
        ctx: &ResolutionContext,
        runtime: &dyn Runtime,
    ) -> TraceResult {
        let limit = self.config.limit();
        let max_depth = self.config.resolve.depth;
        let mut traversal = Traversal::new(ctx, runtime, max_depth, limit);

        tracing::debug!("[walker] following {} entr(ies)", entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let path = self.entry_path(entry);
            if ctx.is_visited(&path) {
                continue;
            }
            traversal.emit(path.clone());
            traversal.expand(&path, 0).await;

            if traversal.limit_reached() {
                let skipped = entries[idx + 1..]
                    .iter()
                    .any(|rest| !ctx.is_visited(&self.entry_path(rest)));
                if skipped {
                    traversal.mark_truncated();
                }
                break;
            }
        }

        let result = traversal.finish_trace();
        if result.truncated {
            tracing::warn!(
                "[walker] limit of {} file(s) reached; output truncated",
                limit.unwrap_or_default()
            );
        }
        result
    }

    /// Expand one JS-family file at `depth`.
    pub async fn resolve_js_imports(
        &self,
        file: &Path,
        depth: usize,
        max_depth: usize,
        ctx: &ResolutionContext,
        runtime: &dyn Runtime,
    ) -> ResolverResult {
        self.resolve_family(Language::Js, file, depth, max_depth, ctx, runtime)
            .await
    }

    /// Expand one PHP-family file at `depth`.
    pub async fn resolve_php_imports(
        &self,
        file: &Path,
        depth: usize,
        max_depth: usize,
        ctx: &ResolutionContext,
        runtime: &dyn Runtime,
    ) -> ResolverResult {
        self.resolve_family(Language::Php, file, depth, max_depth, ctx, runtime)
            .await
    }

    /// Expand `file` with the resolver for its extension.
    ///
    /// The file itself is not part of the result; only what it reaches is.
    /// A file already visited in `ctx`, or without a language family,
    /// contributes nothing.
    pub async fn resolve_imports(
        &self,
        file: &Path,
        depth: usize,
        max_depth: usize,
        ctx: &ResolutionContext,
        runtime: &dyn Runtime,
    ) -> ResolverResult {
        match Language::from_path(file) {
            Some(language) => {
                self.resolve_family(language, file, depth, max_depth, ctx, runtime)
                    .await
            }
            None => ResolverResult::default(),
        }
    }

    async fn resolve_family(
        &self,
        language: Language,
        file: &Path,
        depth: usize,
        max_depth: usize,
        ctx: &ResolutionContext,
        runtime: &dyn Runtime,
    ) -> ResolverResult {
        if Language::from_path(file) != Some(language) {
            return ResolverResult::default();
        }
        let path = self.entry_path(file);
        let mut traversal = Traversal::new(ctx, runtime, max_depth, None);
        traversal.expand(&path, depth).await;
        traversal.finish_subtree()
    }

    fn entry_path(&self, entry: &Path) -> PathBuf {
        self.config.root.join(entry).clean()
    }
}

/// Trace `entries` under `config` on the native filesystem.
pub async fn follow_chain(
    entries: &[PathBuf],
    config: &ProdexConfig,
) -> Result<TraceResult, WalkerError> {
    DependencyWalker::new(config.clone())
        .follow_chain(entries, &NativeRuntime)
        .await
}
