//! Glob scanning of the source tree.
//!
//! Used to append always-included files (type declarations, interfaces) to
//! a trace, and to expand entry globs. Dependency and build output
//! directories are never descended into.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use walkdir::WalkDir;

use crate::exclude::{PatternError, compile};

/// Directory names skipped while scanning.
pub const IGNORED_DIRS: &[&str] = &["node_modules", "vendor", "dist", ".git"];

/// Files under `root` whose root-relative path matches any of `patterns`,
/// sorted.
pub fn scan_globs(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, PatternError> {
    if patterns.is_empty() {
        return Ok(Vec::new());
    }
    let set = compile(patterns)?;

    let mut matches = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !(e.file_type().is_dir()
                    && IGNORED_DIRS.contains(&e.file_name().to_string_lossy().as_ref()))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("[include] skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if set.is_match(relative.as_str()) {
            matches.push(entry.into_path());
        }
    }

    matches.sort();
    Ok(matches)
}

/// Append the files matched by `patterns` to `files`, without duplicates.
pub fn apply_includes(
    root: &Path,
    patterns: &[String],
    files: &[PathBuf],
) -> Result<Vec<PathBuf>, PatternError> {
    let scanned = scan_globs(root, patterns)?;
    tracing::debug!("[include] {} file(s) matched include globs", scanned.len());

    let combined: IndexSet<PathBuf> = files.iter().cloned().chain(scanned).collect();
    Ok(combined.into_iter().collect())
}
