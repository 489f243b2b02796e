//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides the `--log-level` argument.
/// - `RUST_LOG` still wins when set; the returned level is only the fallback filter.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;

    #[test]
    /// What: `--verbose` forces debug; otherwise `--log-level` is used.
    fn log_level_selection() {
        let args = Args::try_parse_from(["anisea", "--log-level", "warn"]).expect("valid");
        assert_eq!(determine_log_level(&args), "warn");
        let args = Args::try_parse_from(["anisea", "--log-level", "warn", "-v"]).expect("valid");
        assert_eq!(determine_log_level(&args), "debug");
    }
}
