//! Glob exclusion matcher.
//!
//! Patterns use standard glob syntax with `/` as a literal separator, so `*`
//! stays within one path segment and `**` spans segments. Candidates are
//! normalised to forward slashes before matching.

use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

/// A glob pattern failed to compile.
#[derive(Debug, thiserror::Error)]
#[error("invalid glob pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: globset::Error,
}

fn build_glob(pattern: &str) -> Result<Glob, PatternError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })
}

/// Compile `patterns` into one set.
pub(crate) fn compile(patterns: &[String]) -> Result<GlobSet, PatternError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(build_glob(pattern)?);
    }
    builder.build().map_err(|source| PatternError {
        pattern: patterns.join(", "),
        source,
    })
}

/// Predicate over specifiers and paths.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    set: GlobSet,
}

impl ExcludeMatcher {
    /// Compile the exclude list. Any invalid pattern fails the whole matcher.
    pub fn new(patterns: &[String]) -> Result<Self, PatternError> {
        Ok(Self {
            set: compile(patterns)?,
        })
    }

    /// A matcher that excludes nothing.
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Whether a raw specifier or identifier is excluded.
    ///
    /// Backslashes are normalised to `/`; a leading `./` is also tried
    /// stripped so `./node_modules/x` matches `node_modules/**`.
    pub fn is_excluded(&self, candidate: &str) -> bool {
        if self.set.is_empty() {
            return false;
        }
        let normalized = candidate.replace('\\', "/");
        if self.set.is_match(normalized.as_str()) {
            return true;
        }
        normalized
            .strip_prefix("./")
            .is_some_and(|rest| self.set.is_match(rest))
    }

    /// Whether a resolved path is excluded, matched relative to `root`.
    ///
    /// Paths outside `root` are matched in their absolute form.
    pub fn is_path_excluded(&self, path: &Path, root: &Path) -> bool {
        if self.set.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.is_excluded(&relative.to_string_lossy())
    }
}

impl Default for ExcludeMatcher {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[&str]) -> ExcludeMatcher {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ExcludeMatcher::new(&patterns).unwrap()
    }

    #[test]
    fn default_excludes() {
        let m = matcher(&["node_modules/**", "@shadcn/**", "**/components/ui/**"]);

        assert!(m.is_excluded("node_modules/react/index.js"));
        assert!(m.is_excluded("./node_modules/react/index.js"));
        assert!(m.is_excluded("@shadcn/button"));
        assert!(m.is_excluded("@/components/ui/button"));
        assert!(m.is_excluded("components/ui/card"));
        assert!(!m.is_excluded("./components/Header"));
        assert!(!m.is_excluded("@lib/x"));
    }

    #[test]
    fn star_stays_within_a_segment() {
        let m = matcher(&["*.css"]);
        assert!(m.is_excluded("app.css"));
        assert!(!m.is_excluded("styles/app.css"));
    }

    #[test]
    fn backslashes_are_normalised() {
        let m = matcher(&["App/Legacy/**"]);
        assert!(m.is_excluded("App\\Legacy\\OldController"));
        assert!(!m.is_excluded("App\\Http\\Controller"));
    }

    #[test]
    fn paths_match_relative_to_root() {
        let m = matcher(&["**/components/ui/**"]);
        let root = Path::new("/project");
        assert!(m.is_path_excluded(Path::new("/project/src/components/ui/button.tsx"), root));
        assert!(!m.is_path_excluded(Path::new("/project/src/components/Nav.tsx"), root));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = ExcludeMatcher::new(&["src/[".to_string()]).unwrap_err();
        assert_eq!(err.pattern, "src/[");
    }

    #[test]
    fn empty_matcher_excludes_nothing() {
        let m = ExcludeMatcher::empty();
        assert!(m.is_empty());
        assert!(!m.is_excluded("anything"));
    }
}
