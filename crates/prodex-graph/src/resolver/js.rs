//! JS-family specifier classification and resolution.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::algorithm::probe_candidate;
use super::aliases::AliasTable;
use crate::context::ResolutionContext;
use crate::language::Language;
use crate::runtime::Runtime;

/// How a local JS specifier is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// Starts with an alias key.
    Alias,
    /// `.`, `..`, `./…` or `../…`.
    Relative,
    /// `/…`.
    Absolute,
}

/// Classify `specifier`; `None` for bare package references.
pub fn classify(specifier: &str, aliases: &AliasTable) -> Option<SpecifierKind> {
    if aliases.key_for(specifier).is_some() {
        Some(SpecifierKind::Alias)
    } else if is_relative(specifier) {
        Some(SpecifierKind::Relative)
    } else if specifier.starts_with('/') {
        Some(SpecifierKind::Absolute)
    } else {
        None
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Resolve a JS specifier imported by `from`.
pub async fn resolve(
    specifier: &str,
    from: &Path,
    ctx: &ResolutionContext,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    let aliases = ctx.aliases(runtime).await;

    match classify(specifier, aliases)? {
        SpecifierKind::Alias => {
            let candidate = aliases.expand(specifier)?;
            probe_candidate(&candidate, Language::Js, ctx, runtime).await
        }
        SpecifierKind::Relative => {
            let dir = from.parent().unwrap_or(Path::new(""));
            let candidate = dir.join(specifier).clean();
            probe_candidate(&candidate, Language::Js, ctx, runtime).await
        }
        SpecifierKind::Absolute => {
            let as_is = PathBuf::from(specifier).clean();
            if let Some(found) = probe_candidate(&as_is, Language::Js, ctx, runtime).await {
                return Some(found);
            }
            let root_relative = ctx.root().join(specifier.trim_start_matches('/')).clean();
            probe_candidate(&root_relative, Language::Js, ctx, runtime).await
        }
    }
}
