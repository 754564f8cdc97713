//! Terminal output: status lines on stderr and the import summary.
//!
//! The traced file list itself goes to stdout so it can be piped; every
//! other line goes to stderr.
//!
//! # Examples
//!
//! ```no_run
//! use prodex_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Following dependency chain...");
//! ui::warning("Limit reached: 200");
//! ```

mod format;
mod messages;

pub use format::{print_file_list, print_import_summary, relative_display};
pub use messages::{error, info, success, warning};

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Enable or disable ANSI styling for everything printed through
/// `console::style`. `--no-color` always wins; otherwise the environment
/// and terminal decide.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}
