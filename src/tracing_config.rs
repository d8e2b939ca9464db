use std::env;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{ConfigPaths, LogLevel};

/// Selects `pretty` (default) or `json` console output.
pub const LOG_FORMAT_ENV: &str = "PI_PLAYER_LOG_FORMAT";

const DAYS_TO_KEEP: usize = 7;

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

fn json_output() -> bool {
    env::var(LOG_FORMAT_ENV).is_ok_and(|format| format == "json")
}

/// Runs `startup` with console logging at the default level.
///
/// The global subscriber needs the configured log level, so anything logged
/// while the configuration is still being loaded goes through this scoped
/// subscriber instead.
pub fn with_startup_logging<R>(startup: impl FnOnce() -> R) -> R {
    let console: Box<dyn Layer<Registry> + Send + Sync> = if json_output() {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };
    let subscriber = tracing_subscriber::registry()
        .with(console)
        .with(filter(LogLevel::default()));

    tracing::subscriber::with_default(subscriber, startup)
}

/// Initialize console logging.
///
/// `RUST_LOG` wins over `level` when set. Logs go to stderr so command
/// output on stdout stays clean.
///
/// # Errors
/// Returns error if a global subscriber is already installed.
pub fn init(level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(filter(level));

    if json_output() {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize console logging plus a daily rotated log file under
/// `~/.pi-player/logs`, keeping a week of history.
///
/// # Errors
/// Returns error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init_with_file(level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = ConfigPaths::log_dir()?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("pi-player")
        .filename_suffix("log")
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(filter(level));

    if json_output() {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    // Flushing worker must outlive main.
    std::mem::forget(guard);

    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    #[test]
    fn startup_logging_uses_default_level() {
        if env::var("RUST_LOG").is_ok() {
            return;
        }

        let (info, debug) = with_startup_logging(|| {
            (tracing::enabled!(Level::INFO), tracing::enabled!(Level::DEBUG))
        });

        assert!(info);
        assert!(!debug);
    }

    #[test]
    fn startup_logging_returns_the_closure_result() {
        assert_eq!(with_startup_logging(|| 6600), 6600);
    }
}
