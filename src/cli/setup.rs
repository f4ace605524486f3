//! Runtime setup for the CLI: logging and terminal formatting.

use crate::formatting::FormattingConfig;
use tracing_subscriber::EnvFilter;

/// Map `-v` occurrences to a default filter directive.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag. `log` records from
/// library code are forwarded through tracing-subscriber's log bridge.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbosity)));

    // Already installed (tests, repeated calls): keep the existing one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Formatting for terminal reports: `--plain` wins, then the environment.
pub fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}
