//! prodex CLI entry point.
//!
//! Parses arguments, initialises logging and dispatches to the command.

use clap::Parser;
use miette::Result;
use prodex_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Trace(trace_args) => commands::trace_execute(trace_args).await,
    };

    // Render failures through miette at the top level
    result.map_err(error::cli_error_to_miette)
}
