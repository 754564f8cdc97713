use clap::{Args, Subcommand};
use prodex_config::ConfigOverrides;
use std::path::PathBuf;

use crate::cli::validation::parse_alias;

/// Available prodex subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Follow the dependency chain from entry files
    ///
    /// Prints every local file reachable from the entries, one per line,
    /// followed by a summary of expected and resolved imports.
    Trace(TraceArgs),
}

/// Arguments for the trace command
#[derive(Args, Debug, Clone, Default)]
pub struct TraceArgs {
    /// Entry files or globs, relative to the root
    ///
    /// Falls back to `entry.files` from prodex.json when omitted.
    ///
    /// Examples:
    ///   prodex trace resources/js/app.tsx
    ///   prodex trace 'app/Http/Controllers/**/*.php'
    #[arg(value_name = "ENTRY")]
    pub entries: Vec<String>,

    /// Project root (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file to use instead of <root>/prodex.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Deepest level that is still expanded; entries are level 0
    #[arg(short, long, value_name = "N")]
    pub depth: Option<usize>,

    /// Maximum number of traced files (0 disables the cap)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Globs whose matches are appended to the output
    ///
    /// Replaces `resolve.include` from the config.
    #[arg(long, value_name = "GLOB", value_delimiter = ',')]
    pub include: Vec<String>,

    /// Globs for specifiers and paths that are never followed
    ///
    /// Replaces `resolve.exclude` from the config.
    #[arg(short, long, value_name = "GLOB", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Alias prefix mapped to a root-relative directory
    ///
    /// Examples:
    ///   --alias @lib=src/lib --alias '~=resources/js'
    #[arg(short, long = "alias", value_name = "KEY=DIR", value_parser = parse_alias)]
    pub aliases: Vec<(String, String)>,

    /// Print files and stats as JSON
    #[arg(long)]
    pub json: bool,
}

impl TraceArgs {
    /// The highest-precedence configuration tier for this run.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            entries: (!self.entries.is_empty()).then(|| self.entries.clone()),
            include: (!self.include.is_empty()).then(|| self.include.clone()),
            exclude: (!self.exclude.is_empty()).then(|| self.exclude.clone()),
            aliases: self.aliases.iter().cloned().collect(),
            depth: self.depth,
            limit: self.limit,
        }
    }
}
