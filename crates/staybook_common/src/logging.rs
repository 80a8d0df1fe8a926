//! Logging utilities for the Staybook application.
//!
//! One tracing subscriber for the whole process: formatted output to stdout and,
//! when `logging.dir` is configured, a daily rolling log file next to it.

use staybook_config::LoggingConfig;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Keeps the background log writer alive. Hold it until the process exits.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

/// Initialize the tracing subscriber with the default level (INFO) and no log file.
///
/// # Examples
///
/// ```
/// staybook_common::logging::init();
/// ```
pub fn init() {
    let _guard = init_from_config(None);
}

/// Initialize the tracing subscriber from the `logging` config section.
///
/// `RUST_LOG` takes precedence over `logging.level`. Calling this twice is harmless:
/// the second call leaves the first subscriber in place.
pub fn init_from_config(config: Option<&LoggingConfig>) -> LogGuard {
    let level = config
        .and_then(|c| c.level.clone())
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let (file_layer, guard) = match config.and_then(|c| c.dir.as_deref()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "staybook.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // try_init: a global default subscriber may already be set (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(file_layer)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }

    LogGuard(guard)
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
