//! Configuration model for a prodex run.
//!
//! For file discovery and layered loading, see the `discovery` module.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default recursion depth for the dependency walker.
pub const DEFAULT_DEPTH: usize = 10;

/// Default cap on the number of files emitted by one run.
pub const DEFAULT_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProdexConfig {
    /// Project root. Always set by the loader, never read from the file.
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub entry: EntryOptions,

    #[serde(default)]
    pub resolve: ResolveOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryOptions {
    /// Entry files or globs, relative to the root.
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Globs whose matches are appended to the traced file set.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Globs matched against raw specifiers and root-relative resolved paths.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Alias prefix to directory (root-relative unless absolute).
    /// Applied after the aliases discovered from build-tool configs.
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,

    /// Deepest node level that is still expanded. Entries are level 0.
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Maximum number of emitted files; 0 disables the cap.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_include() -> Vec<String> {
    vec!["**/*.d.ts".to_string(), "**/*.interface.ts".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules/**".to_string(),
        "@shadcn/**".to_string(),
        "**/components/ui/**".to_string(),
    ]
}

fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("@hooks".to_string(), "resources/js/hooks".to_string()),
        ("@data".to_string(), "resources/js/data".to_string()),
    ])
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: default_exclude(),
            aliases: default_aliases(),
            depth: default_depth(),
            limit: default_limit(),
        }
    }
}

impl Default for ProdexConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            entry: EntryOptions::default(),
            resolve: ResolveOptions::default(),
        }
    }
}

impl ProdexConfig {
    /// Defaults rooted at `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// The output cap, or `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        (self.resolve.limit > 0).then_some(self.resolve.limit)
    }

    /// Resolve a root-relative alias target to an absolute directory.
    pub fn alias_dir(&self, target: &str) -> PathBuf {
        let target = Path::new(target);
        if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.root.join(target)
        }
    }
}

/// Run-time overrides, the highest-precedence configuration tier.
///
/// Only fields that are set take part in the merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub entries: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub aliases: BTreeMap<String, String>,
    pub depth: Option<usize>,
    pub limit: Option<usize>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Nested value containing only the fields that were set.
    pub fn to_value(&self) -> Value {
        let mut resolve = Map::new();
        if let Some(include) = &self.include {
            resolve.insert("include".into(), Value::from(include.clone()));
        }
        if let Some(exclude) = &self.exclude {
            resolve.insert("exclude".into(), Value::from(exclude.clone()));
        }
        if !self.aliases.is_empty() {
            let aliases = self
                .aliases
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(v.clone())))
                .collect::<Map<_, _>>();
            resolve.insert("aliases".into(), Value::Object(aliases));
        }
        if let Some(depth) = self.depth {
            resolve.insert("depth".into(), Value::from(depth));
        }
        if let Some(limit) = self.limit {
            resolve.insert("limit".into(), Value::from(limit));
        }

        let mut root = Map::new();
        if let Some(entries) = &self.entries {
            let mut entry = Map::new();
            entry.insert("files".into(), Value::from(entries.clone()));
            root.insert("entry".into(), Value::Object(entry));
        }
        if !resolve.is_empty() {
            root.insert("resolve".into(), Value::Object(resolve));
        }
        Value::Object(root)
    }
}
