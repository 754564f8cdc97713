//! JS alias table construction.
//!
//! Aliases come from three places, lowest to highest precedence:
//! `tsconfig.json` path mappings, `vite.config.*` alias blocks, then the run
//! configuration. Missing or malformed artifacts contribute nothing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use path_clean::PathClean;
use prodex_config::ProdexConfig;
use regex::Regex;

use super::read_artifact;
use crate::runtime::Runtime;

const TSCONFIG_FILE: &str = "tsconfig.json";
const VITE_CONFIG_FILES: &[&str] = &[
    "vite.config.js",
    "vite.config.ts",
    "vite.config.mjs",
    "vite.config.mts",
];

/// Alias prefix to absolute directory, longest key first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, PathBuf)>,
}

impl AliasTable {
    pub fn new(map: BTreeMap<String, PathBuf>) -> Self {
        let mut entries: Vec<(String, PathBuf)> = map
            .into_iter()
            .filter_map(|(key, dir)| {
                let key = normalize_key(&key);
                (!key.is_empty()).then_some((key, dir))
            })
            .collect();
        entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        entries.dedup_by(|(a, _), (b, _)| a == b);
        Self { entries }
    }

    /// The longest key that `specifier` equals or extends with `/`.
    pub fn key_for(&self, specifier: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key_matches(key, specifier))
            .map(|(key, _)| key.as_str())
    }

    /// Substitute the matched prefix with its directory.
    pub fn expand(&self, specifier: &str) -> Option<PathBuf> {
        let (key, dir) = self
            .entries
            .iter()
            .find(|(key, _)| key_matches(key, specifier))?;
        let rest = specifier[key.len()..].trim_start_matches('/');
        Some(if rest.is_empty() {
            dir.clone()
        } else {
            dir.join(rest).clean()
        })
    }

    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, dir)| dir.as_path())
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
}

fn key_matches(key: &str, specifier: &str) -> bool {
    specifier
        .strip_prefix(key)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn normalize_key(key: &str) -> String {
    let key = key.strip_suffix("/*").unwrap_or(key);
    key.trim_end_matches('/').to_string()
}

/// Build the alias table for `config.root`.
pub async fn load_alias_table(config: &ProdexConfig, runtime: &dyn Runtime) -> AliasTable {
    let root = config.root.as_path();
    let mut map = BTreeMap::new();

    let tsconfig = root.join(TSCONFIG_FILE);
    if let Some(text) = read_artifact(runtime, &tsconfig).await {
        match parse_tsconfig_paths(&text, root) {
            Ok(paths) => map.extend(paths),
            Err(err) => {
                tracing::warn!("[aliases] ignoring malformed {}: {err}", tsconfig.display());
            }
        }
    }

    for name in VITE_CONFIG_FILES {
        let path = root.join(name);
        if let Some(text) = read_artifact(runtime, &path).await {
            let found = parse_vite_aliases(&text, root);
            tracing::debug!("[aliases] {} alias(es) from {}", found.len(), path.display());
            map.extend(found);
        }
    }

    for (key, target) in &config.resolve.aliases {
        map.insert(key.clone(), config.alias_dir(target).clean());
    }

    let table = AliasTable::new(map);
    tracing::debug!("[aliases] {} alias(es) for {}", table.len(), root.display());
    table
}

/// `compilerOptions.paths` of a tsconfig, keyed by prefix.
///
/// Targets are resolved against `compilerOptions.baseUrl` (root-relative,
/// defaulting to the root); only the first target of each mapping is used.
pub fn parse_tsconfig_paths(
    text: &str,
    root: &Path,
) -> Result<BTreeMap<String, PathBuf>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(&sanitize_jsonc(text))?;
    let mut out = BTreeMap::new();

    let Some(compiler) = value.get("compilerOptions") else {
        return Ok(out);
    };
    let base = compiler
        .get("baseUrl")
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| root.to_path_buf(), |b| root.join(b));
    let Some(paths) = compiler.get("paths").and_then(serde_json::Value::as_object) else {
        return Ok(out);
    };

    for (key, targets) in paths {
        let first = match targets {
            serde_json::Value::Array(items) => items.first().and_then(serde_json::Value::as_str),
            serde_json::Value::String(s) => Some(s.as_str()),
            _ => None,
        };
        let Some(first) = first else {
            continue;
        };
        let target = first.strip_suffix("/*").unwrap_or(first);
        let target = target.strip_suffix('*').unwrap_or(target);
        out.insert(normalize_key(key), base.join(target).clean());
    }

    Ok(out)
}

static ALIAS_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\balias\s*:\s*\{([^}]*)\}").expect("alias block pattern"));

static ALIAS_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
        (?: ['"](?P<qkey>[^'"]+)['"] | (?P<key>[A-Za-z_$][\w$]*) )
        \s*:\s*
        (?:
            ['"](?P<lit>[^'"]+)['"]
          | (?:path\.)?resolve\(\s*__dirname\s*,\s*['"](?P<dir>[^'"]+)['"]\s*\)
          | fileURLToPath\(\s*new\s+URL\(\s*['"](?P<url>[^'"]+)['"]\s*,\s*import\.meta\.url\s*\)\s*\)
        )"#,
    )
    .expect("alias entry pattern")
});

/// Entries of every `alias: { ... }` block in a vite config.
///
/// Values may be string literals, `path.resolve(__dirname, '...')` or
/// `fileURLToPath(new URL('...', import.meta.url))`; all resolve against the
/// directory holding the config.
pub fn parse_vite_aliases(text: &str, config_dir: &Path) -> BTreeMap<String, PathBuf> {
    let mut out = BTreeMap::new();
    for block in ALIAS_BLOCK.captures_iter(text) {
        let Some(inner) = block.get(1) else {
            continue;
        };
        for entry in ALIAS_ENTRY.captures_iter(inner.as_str()) {
            let key = entry.name("qkey").or_else(|| entry.name("key"));
            let value = entry
                .name("lit")
                .or_else(|| entry.name("dir"))
                .or_else(|| entry.name("url"));
            if let (Some(key), Some(value)) = (key, value) {
                out.insert(
                    normalize_key(key.as_str()),
                    config_dir.join(value.as_str()).clean(),
                );
            }
        }
    }
    out
}

static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",(\s*[}\]])").expect("trailing comma pattern"));

/// Strip `//` and `/* */` comments outside strings, then trailing commas.
fn sanitize_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                out.push(ch);
                while let Some(c) = chars.next() {
                    out.push(c);
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    } else if c == '"' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            _ => out.push(ch),
        }
    }

    let mut current = out;
    loop {
        let next = TRAILING_COMMA.replace_all(&current, "$1").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}
