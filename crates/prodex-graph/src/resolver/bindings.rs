//! Container bindings declared by service providers.
//!
//! Scans `app/Providers/*.php` for
//! `$this->app->bind(Abstract::class, Concrete::class)` (also `singleton`
//! and `scoped`) so an import of the abstract identifier resolves to the
//! concrete implementation's file.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;

use super::read_artifact;
use crate::extract::php::{namespace_of, use_imports};
use crate::runtime::Runtime;

const PROVIDERS_DIR: &[&str] = &["app", "Providers"];

static BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\$this->app->(?:bind|singleton|scoped)\s*\(\s*\\?([A-Za-z_][\w\\]*)::class\s*,\s*\\?([A-Za-z_][\w\\]*)::class",
    )
    .expect("binding pattern")
});

/// Abstract identifier to concrete identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingMap {
    bindings: FxHashMap<String, String>,
}

impl BindingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, abstract_id: impl Into<String>, concrete: impl Into<String>) {
        self.bindings.insert(abstract_id.into(), concrete.into());
    }

    /// The concrete identifier bound to `identifier`, if any.
    pub fn concrete_for(&self, identifier: &str) -> Option<&str> {
        self.bindings.get(identifier).map(String::as_str)
    }

    /// `identifier` rewritten through its binding.
    pub fn apply<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.concrete_for(identifier).unwrap_or(identifier)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Add the bindings declared in one provider source file.
    pub fn scan_provider(&mut self, text: &str) {
        let imports = use_imports(text);
        let namespace = namespace_of(text);

        let qualify = |name: &str| -> String {
            if name.contains('\\') {
                return name.to_string();
            }
            if let Some(import) = imports.iter().find(|i| i.alias == name) {
                return import.name.clone();
            }
            match &namespace {
                Some(ns) => format!("{ns}\\{name}"),
                None => name.to_string(),
            }
        };

        for captures in BINDING.captures_iter(text) {
            let (Some(abstract_id), Some(concrete)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            let abstract_id = qualify(abstract_id.as_str());
            let concrete = qualify(concrete.as_str());
            tracing::debug!("[bindings] {abstract_id} -> {concrete}");
            self.insert(abstract_id, concrete);
        }
    }
}

/// Build the binding map from the providers under `root`.
pub async fn load_bindings(root: &Path, runtime: &dyn Runtime) -> BindingMap {
    let mut dir = root.to_path_buf();
    dir.extend(PROVIDERS_DIR);

    let mut bindings = BindingMap::new();
    if !runtime.exists(&dir) {
        return bindings;
    }

    let names = match runtime.read_dir(&dir).await {
        Ok(names) => names,
        Err(err) => {
            tracing::debug!("[bindings] cannot list {}: {err}", dir.display());
            return bindings;
        }
    };

    for name in names.iter().filter(|n| n.ends_with(".php")) {
        if let Some(text) = read_artifact(runtime, &dir.join(name)).await {
            bindings.scan_provider(&text);
        }
    }

    tracing::debug!("[bindings] {} binding(s) under {}", bindings.len(), dir.display());
    bindings
}
