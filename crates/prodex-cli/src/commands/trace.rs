//! Trace command implementation.
//!
//! Loads the layered configuration, expands entry globs, follows the
//! dependency chain and prints the result.

use std::path::{Path, PathBuf};

use prodex_config::{ConfigDiscovery, ProdexConfig};
use prodex_graph::{ResolveStats, apply_includes, follow_chain, scan_globs};
use serde::Serialize;

use crate::cli::{TraceArgs, is_glob};
use crate::error::{CliError, Result};
use crate::ui;

/// Outcome of one trace, with paths already made root-relative.
#[derive(Debug, Clone, Serialize)]
pub struct TraceReport {
    pub root: PathBuf,
    /// Traced files followed by include-glob matches, sorted.
    pub files: Vec<String>,
    pub stats: ResolveStats,
    pub truncated: bool,
}

/// Execute the trace command.
///
/// # Errors
///
/// Returns errors for an unreadable config, a missing root, invalid globs,
/// or when no entry files are given.
pub async fn execute(args: TraceArgs) -> Result<()> {
    let report = run(&args).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    ui::print_file_list(&report.files);
    ui::print_import_summary(&report.stats, report.files.len());
    if report.truncated {
        ui::warning("Limit reached; output was truncated");
    }
    Ok(())
}

/// Run a trace without printing anything.
pub async fn run(args: &TraceArgs) -> Result<TraceReport> {
    let config = load_config(args)?;
    let entries = resolve_entries(&config.root, &config.entry.files)?;
    tracing::debug!("{} entry file(s) after glob expansion", entries.len());

    let trace = follow_chain(&entries, &config).await?;
    let files = apply_includes(&config.root, &config.resolve.include, &trace.files)?;

    let mut files: Vec<String> = files
        .iter()
        .map(|f| ui::relative_display(&config.root, f))
        .collect();
    files.sort();

    Ok(TraceReport {
        root: config.root,
        files,
        stats: trace.stats,
        truncated: trace.truncated,
    })
}

/// Merge defaults, `prodex.json`, `PRODEX_*` and the command-line options.
fn load_config(args: &TraceArgs) -> Result<ProdexConfig> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(CliError::FileNotFound(root));
    }

    let mut discovery = ConfigDiscovery::new(&root).with_overrides(args.overrides());
    if let Some(file) = &args.config {
        discovery = discovery.with_file(file);
    }
    Ok(discovery.load()?)
}

/// Expand globs among `patterns`; literal paths pass through unchanged.
/// Order is preserved and duplicates dropped.
pub fn resolve_entries(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let matched = if is_glob(pattern) {
            let found = scan_globs(root, std::slice::from_ref(pattern))?;
            if found.is_empty() {
                tracing::warn!("entry glob '{pattern}' matched no files");
            }
            found
        } else {
            vec![root.join(pattern)]
        };
        for path in matched {
            if !entries.contains(&path) {
                entries.push(path);
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn args_for(root: &Path, entries: &[&str]) -> TraceArgs {
        TraceArgs {
            entries: entries.iter().map(|e| e.to_string()).collect(),
            root: Some(root.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_entries_mixes_literals_and_globs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "src/a.ts", "");
        write(root, "src/b.ts", "");
        write(root, "main.ts", "");

        let entries = resolve_entries(
            root,
            &["main.ts".to_string(), "src/*.ts".to_string(), "src/a.ts".to_string()],
        )
        .unwrap();

        assert_eq!(
            entries,
            vec![root.join("main.ts"), root.join("src/a.ts"), root.join("src/b.ts")]
        );
    }

    #[test]
    fn test_resolve_entries_invalid_glob() {
        let temp = TempDir::new().unwrap();
        let result = resolve_entries(temp.path(), &["src/[".to_string()]);
        assert!(matches!(result, Err(CliError::Pattern(_))));
    }

    #[tokio::test]
    async fn test_run_traces_and_appends_includes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "main.ts", "import './util';\nimport './gone';\n");
        write(root, "util.ts", "");
        write(root, "types/global.d.ts", "");

        let report = run(&args_for(root, &["main.ts"])).await.unwrap();

        assert_eq!(report.files, vec!["main.ts", "types/global.d.ts", "util.ts"]);
        assert_eq!(report.stats.expected_count(), 2);
        assert_eq!(report.stats.resolved_count(), 1);
        assert!(!report.truncated);
    }

    #[tokio::test]
    async fn test_run_falls_back_to_config_entries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "prodex.json", r#"{ "entry": { "files": ["src/*.ts"] } }"#);
        write(root, "src/a.ts", "");

        let report = run(&args_for(root, &[])).await.unwrap();
        assert_eq!(report.files, vec!["src/a.ts"]);
    }

    #[tokio::test]
    async fn test_run_without_entries_fails() {
        let temp = TempDir::new().unwrap();
        let result = run(&args_for(temp.path(), &[])).await;
        assert!(matches!(
            result,
            Err(CliError::Walker(prodex_graph::WalkerError::NoEntries))
        ));
    }

    #[tokio::test]
    async fn test_run_with_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let result = run(&args_for(&missing, &["main.ts"])).await;
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
