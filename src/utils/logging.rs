//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to %APPDATA%\MonitorTray\app.log.
//! Logs from previous runs are shifted on every startup, keeping the last
//! `MAX_LOG_FILES` sessions next to the current one.

use crate::config::data_dir;
use crate::error::{MonitorTrayError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Number of previous sessions kept (app.log.1 through app.log.5)
const MAX_LOG_FILES: u8 = 5;

/// Initialize the logging system
///
/// Log level defaults to INFO and can be changed through `RUST_LOG`.
pub fn init_logging() -> Result<()> {
    let log_dir = data_dir();
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("app.log");
    shift_previous_logs(&log_path)?;

    // Rotation is handled above, once per session
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("app")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| MonitorTrayError::LoggingError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MonitorTrayError::LoggingError(Box::new(e)))?;

    tracing::info!(
        "MonitorTray v{} logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_path.display()
    );

    Ok(())
}

/// Shift `app.log` to `app.log.1`, `app.log.1` to `app.log.2` and so on,
/// dropping the oldest file beyond `MAX_LOG_FILES`.
fn shift_previous_logs(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let (Some(log_dir), Some(log_name)) = (log_path.parent(), log_path.file_name()) else {
        return Err(MonitorTrayError::LoggingError(StringError::new(format!(
            "Invalid log path: {}",
            log_path.display()
        ))));
    };
    let log_name = log_name.to_string_lossy();
    let numbered = |n: u8| log_dir.join(format!("{log_name}.{n}"));

    let oldest = numbered(MAX_LOG_FILES);
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }

    for n in (1..MAX_LOG_FILES).rev() {
        let current = numbered(n);
        if current.exists() {
            std::fs::rename(&current, numbered(n + 1))?;
        }
    }

    std::fs::rename(log_path, numbered(1))?;
    Ok(())
}
