//! Tracing subscriber setup for the binary
//!
//! `RUST_LOG` takes precedence over `logging.level` from the settings. All
//! output goes to stderr so completion results on stdout stay parseable.

use crate::Settings;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, falling back to the configured level
fn build_filter(settings: &Settings) -> EnvFilter {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => {
            let level = if settings.debug {
                "debug"
            } else {
                settings.logging.level.as_str()
            };
            EnvFilter::builder().parse_lossy(level)
        }
    }
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init(settings: &Settings) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
