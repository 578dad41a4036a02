//! Log setup for the `stays` binary.
//!
//! stdout is reserved for the JSON result of the subcommand, so every log line
//! goes to stderr. At the default verbosity only warnings get through, which is
//! exactly the set of records the normalizer dropped; `-v` adds a one-line
//! summary per command and `-vv` the per-computation detail from the engine.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Targets that log: this binary and the engine it drives.
const TARGETS: &[&str] = &["stays", "stay_engine"];

/// Level for a `-v` count: 0 warn, 1 info, 2 debug, 3+ trace.
fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Directive string limiting output to [`TARGETS`] at the given level.
fn default_directives(verbosity: u8) -> String {
    let level = level_for(verbosity).as_str().to_ascii_lowercase();
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. `RUST_LOG`, when set, replaces the `-v` mapping.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
