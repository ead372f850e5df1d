//! Logging init: human-readable lines on stderr, never on the report stream.

use tracing_subscriber::EnvFilter;

/// Directive used when `--verbose` is off: only failures are shown.
const QUIET_FILTER: &str = "error";

/// Directive used with `--verbose`: stage progress plus our own debug detail.
const VERBOSE_FILTER: &str = "info,blacklist_core=debug,blacklist_parser=debug";

/// Filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        QUIET_FILTER
    }
}

/// Initialize logging to stderr. `RUST_LOG` overrides the verbosity default.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .try_init();
}
