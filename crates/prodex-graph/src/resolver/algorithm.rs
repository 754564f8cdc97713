//! Candidate probing.
//!
//! Turns a base candidate path into an existing regular file by trying, in
//! order: the path itself when it already carries a recognised extension,
//! then each probe extension appended, then `index.<ext>` inside the
//! candidate as a directory. Every stat goes through the run's probe cache.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::context::ResolutionContext;
use crate::language::{Language, typescript_sibling};
use crate::runtime::Runtime;

/// Whether `path` is an existing regular file, memoised per run.
pub(crate) async fn is_file(path: &Path, ctx: &ResolutionContext, runtime: &dyn Runtime) -> bool {
    if let Some(hit) = ctx.cached_probe(path) {
        return hit;
    }
    let found = match runtime.metadata(path).await {
        Ok(metadata) => metadata.is_file,
        Err(_) => false,
    };
    ctx.store_probe(path, found);
    found
}

/// First existing file for `candidate` under `language`'s conventions.
pub async fn probe_candidate(
    candidate: &Path,
    language: Language,
    ctx: &ResolutionContext,
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    if language.has_recognized_extension(candidate) {
        if is_file(candidate, ctx, runtime).await {
            return Some(candidate.to_path_buf());
        }
        // `./util.js` written against a `util.ts` source.
        if language == Language::Js {
            if let Some(sibling) = typescript_sibling(candidate) {
                if is_file(&sibling, ctx, runtime).await {
                    return Some(sibling);
                }
            }
        }
        return None;
    }

    for ext in language.probe_extensions() {
        let with_ext = append_extension(candidate, ext);
        if is_file(&with_ext, ctx, runtime).await {
            return Some(with_ext);
        }
    }

    for ext in language.probe_extensions() {
        let index = candidate.join(format!("index.{ext}"));
        if is_file(&index, ctx, runtime).await {
            return Some(index);
        }
    }

    None
}

/// `path` + `.ext`, keeping any dots already in the file name.
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
