//! Logging and observability
//!
//! Structured logging via tracing, with text or JSON formatting selected at
//! runtime via environment variables and CLI flags (no feature flags).
//!
//! All logging output is directed to stderr to preserve stdout for the child
//! processes' own output.

use anyhow::Result;
use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the logging system with optional format and default level.
///
/// `format` selects `"text"` (the default) or `"json"` output; when `None`,
/// the `SPACEMAN_LOG_FORMAT` environment variable is consulted. The filter is
/// taken from `SPACEMAN_LOG`, falling back to `RUST_LOG`, falling back to
/// `default_level` (or `"info"`). Safe to call multiple times; subsequent
/// calls are no-ops.
pub fn init(format: Option<&str>, default_level: Option<&str>) -> Result<()> {
    INIT.call_once(|| {
        let filter = create_env_filter(default_level);

        let env_format = std::env::var("SPACEMAN_LOG_FORMAT").ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
            _ => {
                // Default to text format (including None, "text", or any other value)
                tracing_subscriber::registry()
                    .with(fmt::layer().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!("Logging initialized with format: {}", effective_format);
    });

    Ok(())
}

/// Create an EnvFilter based on environment variables
fn create_env_filter(default_level: Option<&str>) -> EnvFilter {
    let fallback = default_level.unwrap_or("info");
    if let Ok(spec) = std::env::var("SPACEMAN_LOG") {
        EnvFilter::try_new(&spec).unwrap_or_else(|_| EnvFilter::new(fallback))
    } else if let Ok(spec) = std::env::var("RUST_LOG") {
        EnvFilter::try_new(&spec).unwrap_or_else(|_| EnvFilter::new(fallback))
    } else {
        EnvFilter::new(fallback)
    }
}

/// Check if logging has been initialized
///
/// This is primarily useful for testing scenarios where you need to know
/// if the logging system has already been set up.
pub fn is_initialized() -> bool {
    INIT.is_completed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Use a mutex to ensure tests don't interfere with each other
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_init_multiple_calls_safe() {
        let _guard = TEST_MUTEX.lock().unwrap();

        assert!(init(None, None).is_ok());
        assert!(init(Some("json"), None).is_ok());
        assert!(init(Some("text"), Some("debug")).is_ok());
    }

    #[test]
    fn test_env_filter_creation() {
        let _filter = create_env_filter(Some("debug"));
        let _filter = create_env_filter(None);
    }

    #[test]
    fn test_is_initialized() {
        let _guard = TEST_MUTEX.lock().unwrap();

        let _ = init(None, None);
        assert!(is_initialized());
    }
}
