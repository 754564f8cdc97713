//! Command-line interface definition for prodex.
//!
//! # Command Structure
//!
//! - `prodex trace` - follow the dependency chain from entry files

mod commands;
mod validation;

use clap::Parser;

pub use commands::{Command, TraceArgs};
pub use validation::{is_glob, parse_alias};

/// prodex - flatten a source tree by tracing its imports
#[derive(Parser, Debug)]
#[command(
    name = "prodex",
    version,
    about = "Trace the local dependency graph of a source tree",
    long_about = "prodex follows import, require, include and use statements from a set of\n\
                  entry files and prints every local file they transitively depend on.\n\
                  JS/TS and PHP sources are understood; aliases come from tsconfig.json,\n\
                  vite.config.* and prodex.json, namespaces from composer.json."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows per-file resolution counts and every specifier that failed
    /// to resolve.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
