//! Formatting for the traced file list and the import summary.

use std::path::Path;

use console::{Term, style};
use prodex_graph::ResolveStats;

/// Root-relative, forward-slash display form of `path`.
///
/// Paths outside `root` are shown as-is.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use prodex_cli::ui::relative_display;
///
/// assert_eq!(relative_display(Path::new("/p"), Path::new("/p/src/a.ts")), "src/a.ts");
/// assert_eq!(relative_display(Path::new("/p"), Path::new("/q/b.ts")), "/q/b.ts");
/// ```
pub fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Print one file per line to stdout.
pub fn print_file_list(files: &[String]) {
    for file in files {
        println!("{file}");
    }
}

/// Print the import summary to stderr.
///
/// Shows how many files were traced, how many unique specifiers were seen
/// and resolved, and lists the ones that never resolved.
pub fn print_import_summary(stats: &ResolveStats, file_count: usize) {
    let width = (Term::stderr().size().1 as usize).clamp(20, 60);

    eprintln!("\n{}", style("Summary").bold().underlined());
    eprintln!("{}", "─".repeat(width));
    eprintln!("  {:<26}{}", "Files traced:", style(file_count).green());
    eprintln!("  {:<26}{}", "Unique imports expected:", stats.expected_count());
    eprintln!("  {:<26}{}", "Unique imports resolved:", style(stats.resolved_count()).green());

    let missing = stats.missing();
    if !missing.is_empty() {
        eprintln!(
            "  {:<26}{}",
            "Unresolved:",
            style(missing.len()).yellow()
        );
        for specifier in missing {
            eprintln!("    {} {}", style("▸").yellow(), specifier);
        }
    }
    eprintln!("{}", "─".repeat(width));
}
