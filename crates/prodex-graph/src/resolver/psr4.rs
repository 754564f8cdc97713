//! PHP namespace map from `composer.json` PSR-4 autoload sections.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::read_artifact;
use crate::runtime::Runtime;

const COMPOSER_FILE: &str = "composer.json";

/// Namespace prefix to base directory, longest prefix first.
///
/// The empty prefix is a valid fallback namespace and always sorts last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    entries: Vec<(String, PathBuf)>,
}

impl NamespaceMap {
    pub fn new(entries: impl IntoIterator<Item = (String, PathBuf)>) -> Self {
        let mut entries: Vec<(String, PathBuf)> = entries
            .into_iter()
            .map(|(ns, dir)| (normalize_namespace(&ns), dir))
            .collect();
        // Stable sort keeps the first occurrence of a duplicate prefix first.
        entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        entries.dedup_by(|(a, _), (b, _)| a == b);
        Self { entries }
    }

    /// The longest prefix that `identifier` equals or extends with `\`.
    pub fn prefix_for(&self, identifier: &str) -> Option<&str> {
        self.find(identifier).map(|(ns, _)| ns.as_str())
    }

    /// Base candidate for `identifier`: `<dir>/<rest with \ as />`.
    pub fn candidate(&self, identifier: &str) -> Option<PathBuf> {
        let (ns, dir) = self.find(identifier)?;
        let rest = identifier[ns.len()..].trim_start_matches('\\');
        if rest.is_empty() {
            return Some(dir.clone());
        }
        Some(dir.join(rest.replace('\\', "/")).clean())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d.as_path()))
    }

    fn find(&self, identifier: &str) -> Option<&(String, PathBuf)> {
        self.entries.iter().find(|(ns, _)| {
            ns.is_empty()
                || identifier
                    .strip_prefix(ns.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('\\'))
        })
    }
}

fn normalize_namespace(ns: &str) -> String {
    ns.trim_start_matches('\\').trim_end_matches('\\').to_string()
}

#[derive(Debug, Default, Deserialize)]
struct ComposerManifest {
    #[serde(default)]
    autoload: Autoload,
    #[serde(default, rename = "autoload-dev")]
    autoload_dev: Autoload,
}

#[derive(Debug, Default, Deserialize)]
struct Autoload {
    #[serde(default, rename = "psr-4")]
    psr4: FxHashMap<String, Psr4Target>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Psr4Target {
    One(String),
    Many(Vec<String>),
}

impl Psr4Target {
    fn first(&self) -> Option<&str> {
        match self {
            Self::One(dir) => Some(dir),
            Self::Many(dirs) => dirs.first().map(String::as_str),
        }
    }
}

/// Parse a composer manifest into a namespace map rooted at `root`.
///
/// `autoload` entries win over `autoload-dev` entries for the same prefix.
pub fn parse_composer(text: &str, root: &Path) -> Result<NamespaceMap, serde_json::Error> {
    let manifest: ComposerManifest = serde_json::from_str(text)?;

    let mut entries = Vec::new();
    for section in [&manifest.autoload, &manifest.autoload_dev] {
        let mut sorted: Vec<_> = section.psr4.iter().collect();
        sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (ns, target) in sorted {
            if let Some(dir) = target.first() {
                entries.push((ns.clone(), root.join(dir).clean()));
            }
        }
    }

    Ok(NamespaceMap::new(entries))
}

/// Build the namespace map for `root`.
pub async fn load_namespace_map(root: &Path, runtime: &dyn Runtime) -> NamespaceMap {
    let path = root.join(COMPOSER_FILE);
    let Some(text) = read_artifact(runtime, &path).await else {
        return NamespaceMap::default();
    };

    match parse_composer(&text, root) {
        Ok(map) => {
            tracing::debug!("[psr4] {} namespace(s) from {}", map.len(), path.display());
            map
        }
        Err(err) => {
            tracing::warn!("[psr4] ignoring malformed {}: {err}", path.display());
            NamespaceMap::default()
        }
    }
}
