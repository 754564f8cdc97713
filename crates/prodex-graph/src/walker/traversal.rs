//! Work-list traversal.
//!
//! A stack of frames replaces call recursion: the top frame is the file
//! currently being expanded, and each frame carries its remaining
//! specifiers. Popping a frame marks its file `Done` and folds its stats into
//! the parent, which reproduces the per-subtree stats of a recursive walk
//! while keeping depth an explicit field.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;

use super::{ResolverResult, TraceResult};
use crate::context::ResolutionContext;
use crate::extract::{Specifiers, extract_specifiers};
use crate::language::{Language, is_declaration_file};
use crate::resolver;
use crate::runtime::{Runtime, read_text};
use crate::stats::ResolveStats;

/// What happened to one specifier.
#[derive(Debug)]
enum Outcome {
    /// Bare package or unknown namespace; not counted.
    External,
    /// Matched the exclude list; not counted.
    Excluded,
    /// Counted as expected, no file found.
    Missing(String),
    Resolved { id: String, path: PathBuf },
}

struct Frame {
    path: PathBuf,
    depth: usize,
    language: Language,
    pending: std::vec::IntoIter<String>,
    stats: ResolveStats,
}

pub(super) struct Traversal<'a> {
    ctx: &'a ResolutionContext,
    runtime: &'a dyn Runtime,
    max_depth: usize,
    limit: Option<usize>,
    files: IndexSet<PathBuf>,
    stats: ResolveStats,
    stopped: bool,
    /// Set only when the cap left files or specifiers unvisited.
    truncated: bool,
}

impl<'a> Traversal<'a> {
    pub(super) fn new(
        ctx: &'a ResolutionContext,
        runtime: &'a dyn Runtime,
        max_depth: usize,
        limit: Option<usize>,
    ) -> Self {
        Self {
            ctx,
            runtime,
            max_depth,
            limit,
            files: IndexSet::new(),
            stats: ResolveStats::new(),
            stopped: false,
            truncated: false,
        }
    }

    pub(super) fn emit(&mut self, path: PathBuf) {
        self.files.insert(path);
    }

    /// Whether the size cap has been hit. Latches once true.
    pub(super) fn limit_reached(&mut self) -> bool {
        if !self.stopped {
            self.stopped = self.limit.is_some_and(|limit| self.files.len() >= limit);
        }
        self.stopped
    }

    /// Record that the cap stopped work that was still outstanding.
    pub(super) fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    /// Expand `file` at `depth` until its subtree is done or the cap is hit.
    pub(super) async fn expand(&mut self, file: &Path, depth: usize) {
        let Some(first) = self.enter(file, depth).await else {
            return;
        };
        let mut stack = vec![first];

        while let Some(frame) = stack.last_mut() {
            let Some(specifier) = frame.pending.next() else {
                let Some(done) = stack.pop() else {
                    break;
                };
                self.complete(done, &mut stack);
                if self.limit_reached() {
                    if stack.iter().any(|frame| frame.pending.len() > 0) {
                        self.mark_truncated();
                    }
                    // Unfinished ancestors still own counted specifiers.
                    for frame in stack.drain(..) {
                        self.stats.merge(&frame.stats);
                    }
                    return;
                }
                continue;
            };

            let from = frame.path.clone();
            let child_depth = frame.depth + 1;
            let language = frame.language;
            let outcome = self.visit_specifier(&specifier, &from, language).await;

            let Some(frame) = stack.last_mut() else {
                break;
            };
            match outcome {
                Outcome::External | Outcome::Excluded => {}
                Outcome::Missing(id) => frame.stats.expect(id),
                Outcome::Resolved { id, path } => {
                    frame.stats.resolve(id);
                    self.emit(path.clone());
                    if let Some(child) = self.enter(&path, child_depth).await {
                        stack.push(child);
                    }
                }
            }
        }
    }

    /// Enter `file`, returning a frame when it should be expanded.
    ///
    /// A file that is cut off by depth, excluded, declaration-only or of no
    /// known family is still marked visited.
    async fn enter(&mut self, file: &Path, depth: usize) -> Option<Frame> {
        if !self.ctx.try_enter(file) {
            return None;
        }

        let language = Language::from_path(file);
        let expandable = depth <= self.max_depth
            && !is_declaration_file(file)
            && !self.ctx.exclude().is_path_excluded(file, self.ctx.root());
        let Some(language) = language.filter(|_| expandable) else {
            tracing::trace!("[walker] not expanding {} at depth {depth}", file.display());
            self.ctx.finish(file);
            return None;
        };

        let specifiers = self.specifiers(file, language).await;
        Some(Frame {
            path: file.to_path_buf(),
            depth,
            language,
            pending: specifiers.iter().cloned().collect::<Vec<_>>().into_iter(),
            stats: ResolveStats::new(),
        })
    }

    fn complete(&mut self, done: Frame, stack: &mut [Frame]) {
        self.ctx.finish(&done.path);

        tracing::debug!(
            "[walker] {} -> expected: {}, resolved: {}",
            done.path.display(),
            done.stats.expected_count(),
            done.stats.resolved_count()
        );
        let missing = done.stats.missing();
        if !missing.is_empty() {
            tracing::debug!("[walker] {} missing: {:?}", done.path.display(), missing);
        }

        match stack.last_mut() {
            Some(parent) => parent.stats.merge(&done.stats),
            None => self.stats.merge(&done.stats),
        }
    }

    async fn visit_specifier(&self, specifier: &str, from: &Path, language: Language) -> Outcome {
        let Some(id) = resolver::classify(language, specifier, self.ctx, self.runtime).await
        else {
            return Outcome::External;
        };

        let exclude = self.ctx.exclude();
        if exclude.is_excluded(specifier) || (id != specifier && exclude.is_excluded(&id)) {
            tracing::trace!("[walker] excluded {specifier}");
            return Outcome::Excluded;
        }

        match resolver::resolve_classified(language, &id, from, self.ctx, self.runtime).await {
            Some(path) if exclude.is_path_excluded(&path, self.ctx.root()) => {
                tracing::trace!("[walker] excluded {}", path.display());
                Outcome::Excluded
            }
            Some(path) => Outcome::Resolved { id, path },
            None => Outcome::Missing(id),
        }
    }

    /// Specifiers of `file`, read and extracted once per run.
    async fn specifiers(&self, file: &Path, language: Language) -> Arc<Specifiers> {
        if let Some(cached) = self.ctx.cached_specifiers(file) {
            return cached;
        }

        let specifiers = match read_text(self.runtime, file).await {
            Ok(text) => extract_specifiers(language, file, &text),
            Err(err) => {
                tracing::debug!("[walker] skipping unreadable {}: {err}", file.display());
                Specifiers::new()
            }
        };
        let specifiers = Arc::new(specifiers);
        self.ctx.store_specifiers(file, Arc::clone(&specifiers));
        specifiers
    }

    pub(super) fn finish_trace(self) -> TraceResult {
        let mut truncated = self.truncated;
        let mut files: Vec<PathBuf> = self.files.into_iter().collect();
        if let Some(limit) = self.limit {
            truncated |= files.len() > limit;
            files.truncate(limit);
        }
        TraceResult {
            files,
            stats: self.stats,
            truncated,
        }
    }

    pub(super) fn finish_subtree(self) -> ResolverResult {
        ResolverResult {
            files: self.files.into_iter().collect(),
            stats: self.stats,
        }
    }
}
