//! PHP-family specifier classification and resolution.
//!
//! Two shapes are local: include/require path literals, and qualified
//! identifiers under a known namespace prefix (after binding rewrite).
//! Everything else (framework classes, vendor namespaces) is external.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::algorithm::probe_candidate;
use super::bindings::BindingMap;
use super::psr4::NamespaceMap;
use crate::context::ResolutionContext;
use crate::language::Language;
use crate::runtime::Runtime;

/// Whether `specifier` is an include path rather than a qualified name.
pub fn is_include_path(specifier: &str) -> bool {
    specifier.contains('/') || specifier.to_ascii_lowercase().ends_with(".php")
}

/// The identifier to resolve for `specifier`, or `None` when external.
///
/// Namespaced identifiers are rewritten through `bindings` first.
pub fn classify(
    specifier: &str,
    namespaces: &NamespaceMap,
    bindings: &BindingMap,
) -> Option<String> {
    if is_include_path(specifier) {
        return Some(specifier.to_string());
    }
    let identifier = bindings.apply(specifier);
    namespaces
        .prefix_for(identifier)
        .map(|_| identifier.to_string())
}

/// Resolve an already-classified PHP identifier or include path.
pub async fn resolve(
    identifier: &str,
    from: &Path,
    ctx: &ResolutionContext,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    let candidate = if is_include_path(identifier) {
        let path = Path::new(identifier);
        if path.is_absolute() {
            path.clean()
        } else {
            from.parent().unwrap_or(Path::new("")).join(path).clean()
        }
    } else {
        ctx.namespaces(runtime).await.candidate(identifier)?
    };

    probe_candidate(&candidate, Language::Php, ctx, runtime).await
}
