//! Diagnostic logging setup
//!
//! Diagnostics go to stderr so command output on stdout stays clean.
//! `RUST_LOG` overrides the default filter; setting `SPLITBOOK_LOG_JSON`
//! switches to JSON lines.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that enables JSON log output
pub const LOG_JSON_ENV: &str = "SPLITBOOK_LOG_JSON";

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "splitbook=debug"
    } else {
        "splitbook=warn"
    }
}

/// Install the global tracing subscriber
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let json_logging = std::env::var(LOG_JSON_ENV).is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
