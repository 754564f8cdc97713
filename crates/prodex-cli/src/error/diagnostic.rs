//! Miette diagnostic conversion for CLI errors.

use miette::Report;
use prodex_graph::WalkerError;

use super::CliError;

/// Convert a `CliError` into a miette report, attaching a hint where the
/// fix is obvious.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Walker(WalkerError::NoEntries) => miette::miette!(
            help = "Pass entry files or globs on the command line, or set entry.files in prodex.json",
            "No entry files given"
        ),
        CliError::Walker(WalkerError::InvalidPattern(e)) | CliError::Pattern(e) => {
            miette::miette!(
                help = "Check the include/exclude globs in prodex.json or on the command line",
                "{e}"
            )
        }
        CliError::Config(e) => miette::miette!(
            help = "Check prodex.json and any PRODEX_* environment variables",
            "Configuration error: {e}"
        ),
        CliError::FileNotFound(path) => {
            miette::miette!(help = "Check the --root argument", "File not found: {}", path.display())
        }
        other => miette::miette!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodex_config::ConfigError;

    #[test]
    fn test_no_entries_has_help() {
        let report = cli_error_to_miette(CliError::Walker(WalkerError::NoEntries));
        assert_eq!(report.to_string(), "No entry files given");
        assert!(report.help().is_some());
    }

    #[test]
    fn test_config_error_keeps_message() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::NotFound));
        assert!(report.to_string().contains("config not found"));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let report = cli_error_to_miette(CliError::InvalidArgument("bad".into()));
        assert_eq!(report.to_string(), "Invalid argument: bad");
    }
}
