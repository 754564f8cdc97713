//! Source language families and their file conventions.

use std::path::Path;

/// Extensions probed, in order, for extensionless JS-family specifiers.
pub const JS_PROBE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "d.ts"];

/// Extensions probed for PHP-family candidates.
pub const PHP_PROBE_EXTENSIONS: &[&str] = &["php"];

const JS_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts"];
const DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];

/// Language family of a source file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// JavaScript / TypeScript and their module variants.
    Js,
    /// PHP.
    Php,
}

impl Language {
    /// Infer the family of `path`, or `None` for files that are never expanded.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "php" {
            Some(Self::Php)
        } else if JS_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Js)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Php => "php",
        }
    }

    /// Extensions probed when a candidate has no recognised extension.
    pub fn probe_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Js => JS_PROBE_EXTENSIONS,
            Self::Php => PHP_PROBE_EXTENSIONS,
        }
    }

    /// Whether `path` already ends in an extension this family resolves directly.
    pub fn has_recognized_extension(self, path: &Path) -> bool {
        match self {
            Self::Js => is_declaration_file(path) || Self::from_path(path) == Some(Self::Js),
            Self::Php => Self::from_path(path) == Some(Self::Php),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Declaration-only JS artifact (`.d.ts` and friends). Emitted, never expanded.
pub fn is_declaration_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    DECLARATION_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// TypeScript sibling of a JS-extension path (`x.js` → `x.ts`), for
/// ESM-style TypeScript sources that import their compiled names.
pub fn typescript_sibling(path: &Path) -> Option<std::path::PathBuf> {
    let ext = path.extension()?.to_str()?;
    let ts = match ext {
        "js" => "ts",
        "jsx" => "tsx",
        "mjs" => "mts",
        "cjs" => "cts",
        _ => return None,
    };
    Some(path.with_extension(ts))
}
