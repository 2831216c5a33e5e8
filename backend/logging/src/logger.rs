//! Subscriber setup for the `medrelay` binary.
//!
//! Human-readable lines go to stderr so `medrelay check` keeps stdout for its
//! JSON dump. With a log directory, every event is also appended as one JSON
//! object per line to a daily file.

use std::io::IsTerminal;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "medrelay.log";
const FALLBACK_LEVEL: &str = "info";

/// Install the global subscriber. Returns `false` if one was already set.
///
/// `RUST_LOG` wins over `level`; an unparsable level falls back to `info`.
/// Files are named `<log_dir>/medrelay.log.YYYY-MM-DD`.
pub fn init_logger(log_dir: Option<&Path>, level: &str) -> bool {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = level_filter(rust_log.as_deref(), level);

    let file_layer = log_dir.map(|dir| {
        fmt::layer()
            .json()
            .with_writer(RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX))
            .with_ansi(false)
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
}

fn level_filter(from_env: Option<&str>, level: &str) -> EnvFilter {
    from_env
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn configured_level_applies_without_rust_log() {
        let filter = level_filter(None, "debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = level_filter(Some("  "), "debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        let filter = level_filter(Some("warn"), "debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn bad_level_falls_back_to_info() {
        let filter = level_filter(Some("medrelay=loud"), "medrelay=louder");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
