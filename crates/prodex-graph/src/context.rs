//! Per-run resolution state.
//!
//! One `ResolutionContext` is built for each top-level run and dropped when
//! the run ends. It owns the lazily-built alias, namespace and binding
//! tables, the visited-state map, and every memo the resolver keeps, so no
//! state leaks between runs (or tests).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use prodex_config::ProdexConfig;
use rustc_hash::FxHashMap;
use tokio::sync::OnceCell;

use crate::exclude::{ExcludeMatcher, PatternError};
use crate::extract::Specifiers;
use crate::resolver::{
    AliasTable, BindingMap, NamespaceMap, aliases::load_alias_table, bindings::load_bindings,
    psr4::load_namespace_map,
};
use crate::runtime::Runtime;

/// Traversal state of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    Unvisited,
    /// Entered; its specifiers are being processed.
    Visiting,
    /// All specifiers processed, or expansion declined.
    Done,
}

/// Run-scoped tables, visited set and caches.
#[derive(Debug)]
pub struct ResolutionContext {
    config: ProdexConfig,
    exclude: ExcludeMatcher,

    aliases: OnceCell<AliasTable>,
    namespaces: OnceCell<NamespaceMap>,
    bindings: OnceCell<BindingMap>,

    visited: Mutex<FxHashMap<PathBuf, VisitState>>,
    specifiers: Mutex<FxHashMap<PathBuf, Arc<Specifiers>>>,
    file_probes: Mutex<FxHashMap<PathBuf, bool>>,
    resolutions: Mutex<FxHashMap<(String, PathBuf), Option<PathBuf>>>,
}

impl ResolutionContext {
    /// Build a context for `config`. Fails only on an invalid exclude glob.
    pub fn new(config: ProdexConfig) -> Result<Self, PatternError> {
        let exclude = ExcludeMatcher::new(&config.resolve.exclude)?;
        Ok(Self {
            config,
            exclude,
            aliases: OnceCell::new(),
            namespaces: OnceCell::new(),
            bindings: OnceCell::new(),
            visited: Mutex::new(FxHashMap::default()),
            specifiers: Mutex::new(FxHashMap::default()),
            file_probes: Mutex::new(FxHashMap::default()),
            resolutions: Mutex::new(FxHashMap::default()),
        })
    }

    pub fn config(&self) -> &ProdexConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub fn exclude(&self) -> &ExcludeMatcher {
        &self.exclude
    }

    /// JS alias table, built on first use.
    pub async fn aliases(&self, runtime: &dyn Runtime) -> &AliasTable {
        self.aliases
            .get_or_init(|| load_alias_table(&self.config, runtime))
            .await
    }

    /// PHP namespace map, built on first use.
    pub async fn namespaces(&self, runtime: &dyn Runtime) -> &NamespaceMap {
        self.namespaces
            .get_or_init(|| load_namespace_map(&self.config.root, runtime))
            .await
    }

    /// PHP binding map, built on first use.
    pub async fn bindings(&self, runtime: &dyn Runtime) -> &BindingMap {
        self.bindings
            .get_or_init(|| load_bindings(&self.config.root, runtime))
            .await
    }

    pub fn state(&self, path: &Path) -> VisitState {
        self.visited
            .lock()
            .get(path)
            .copied()
            .unwrap_or(VisitState::Unvisited)
    }

    pub fn is_visited(&self, path: &Path) -> bool {
        self.state(path) != VisitState::Unvisited
    }

    /// Move `path` from `Unvisited` to `Visiting`.
    ///
    /// Returns `false` if the path was already entered. Check and insert
    /// happen under one lock, so concurrent callers get exactly one `true`.
    pub fn try_enter(&self, path: &Path) -> bool {
        let mut visited = self.visited.lock();
        if visited.contains_key(path) {
            return false;
        }
        visited.insert(path.to_path_buf(), VisitState::Visiting);
        true
    }

    pub fn finish(&self, path: &Path) {
        self.visited
            .lock()
            .insert(path.to_path_buf(), VisitState::Done);
    }

    /// Number of files entered so far.
    pub fn visited_count(&self) -> usize {
        self.visited.lock().len()
    }

    pub(crate) fn cached_specifiers(&self, path: &Path) -> Option<Arc<Specifiers>> {
        self.specifiers.lock().get(path).cloned()
    }

    pub(crate) fn store_specifiers(&self, path: &Path, specifiers: Arc<Specifiers>) {
        self.specifiers.lock().insert(path.to_path_buf(), specifiers);
    }

    pub(crate) fn cached_probe(&self, path: &Path) -> Option<bool> {
        self.file_probes.lock().get(path).copied()
    }

    pub(crate) fn store_probe(&self, path: &Path, is_file: bool) {
        self.file_probes.lock().insert(path.to_path_buf(), is_file);
    }

    pub(crate) fn cached_resolution(&self, specifier: &str, from: &Path) -> Option<Option<PathBuf>> {
        self.resolutions
            .lock()
            .get(&(specifier.to_string(), from.to_path_buf()))
            .cloned()
    }

    pub(crate) fn store_resolution(&self, specifier: &str, from: &Path, resolved: Option<PathBuf>) {
        self.resolutions
            .lock()
            .insert((specifier.to_string(), from.to_path_buf()), resolved);
    }
}
