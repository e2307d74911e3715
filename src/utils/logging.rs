//! Diagnostic logging setup
//!
//! Stage diagnostics are emitted with `tracing` macros. The binary installs a
//! `fmt` subscriber on stderr so they never mix with the styled report on
//! stdout.

use tracing_subscriber::EnvFilter;

/// Map the `-v` count onto a default filter directive
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over `verbosity`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
