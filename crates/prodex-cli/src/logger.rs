//! Logging infrastructure for the prodex CLI.
//!
//! Structured logging on top of `tracing`. The engine logs per-node
//! resolution counts at debug level and limit hits at warn level; this
//! module decides which of those reach the terminal.
//!
//! # Example
//!
//! ```rust,no_run
//! use prodex_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("tracing dependencies");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by `--verbose`.
pub const VERBOSE_FILTER: &str = "prodex=debug,prodex_graph=debug,prodex_config=debug,prodex_cli=debug";

/// Filter used by `--quiet`.
pub const QUIET_FILTER: &str = "prodex=error,prodex_graph=error,prodex_config=error,prodex_cli=error";

/// Filter used when neither flag nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "prodex=info,prodex_graph=info,prodex_config=info,prodex_cli=info";

/// Initialize the tracing subscriber.
///
/// Should be called once, before any logging occurs.
///
/// # Verbosity Levels
///
/// 1. `--verbose`: DEBUG for prodex crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`: custom filter
/// 4. Otherwise INFO for prodex crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Initialize logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Pick the filter for the given flags. `verbose` wins over `quiet`.
pub fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Check if colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
