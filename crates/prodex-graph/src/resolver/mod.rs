//! Specifier to file resolution.
//!
//! Resolution is two steps. [`classify`] decides whether a raw specifier is
//! local at all and yields the identifier that is counted in stats (for PHP
//! this is the binding-rewritten name). [`resolve_classified`] then maps that
//! identifier to zero or one existing file, memoised per (identifier,
//! importing file). A miss is a `None`, never an error.

pub mod algorithm;
pub mod aliases;
pub mod bindings;
pub mod js;
pub mod php;
pub mod psr4;

use std::path::{Path, PathBuf};

pub use aliases::AliasTable;
pub use bindings::BindingMap;
pub use psr4::NamespaceMap;

use crate::context::ResolutionContext;
use crate::language::Language;
use crate::runtime::{Runtime, read_text};

/// The identifier to count and resolve for `specifier`, or `None` for
/// external references, which are ignored outright.
pub async fn classify(
    language: Language,
    specifier: &str,
    ctx: &ResolutionContext,
    runtime: &dyn Runtime,
) -> Option<String> {
    match language {
        Language::Js => {
            let aliases = ctx.aliases(runtime).await;
            js::classify(specifier, aliases).map(|_| specifier.to_string())
        }
        Language::Php => {
            let namespaces = ctx.namespaces(runtime).await;
            let bindings = ctx.bindings(runtime).await;
            php::classify(specifier, namespaces, bindings)
        }
    }
}

/// Resolve an identifier produced by [`classify`].
pub async fn resolve_classified(
    language: Language,
    identifier: &str,
    from: &Path,
    ctx: &ResolutionContext,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    if let Some(cached) = ctx.cached_resolution(identifier, from) {
        return cached;
    }

    let resolved = match language {
        Language::Js => js::resolve(identifier, from, ctx, runtime).await,
        Language::Php => php::resolve(identifier, from, ctx, runtime).await,
    };

    ctx.store_resolution(identifier, from, resolved.clone());
    resolved
}

/// Map one raw specifier imported by `from` to an absolute file path.
pub async fn resolve(
    specifier: &str,
    from: &Path,
    ctx: &ResolutionContext,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    let language = Language::from_path(from)?;
    let identifier = classify(language, specifier, ctx, runtime).await?;
    resolve_classified(language, &identifier, from, ctx, runtime).await
}

/// Read an optional config artifact. Missing or unreadable files give `None`.
pub(crate) async fn read_artifact(runtime: &dyn Runtime, path: &Path) -> Option<String> {
    if !runtime.exists(path) {
        return None;
    }
    match read_text(runtime, path).await {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::debug!("[resolver] cannot read {}: {err}", path.display());
            None
        }
    }
}
