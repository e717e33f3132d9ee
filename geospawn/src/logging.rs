//! Logging infrastructure for GeoSpawn.
//!
//! Installs a global `tracing` subscriber with two layers:
//! - a non-blocking file writer (the file is truncated at session start)
//! - a compact stderr writer, optionally disabled
//!
//! Filtering follows `RUST_LOG`, defaulting to `info`.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging with file and console output.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    init_logging_with(log_dir, log_file, true, false)
}

/// Initialize logging.
///
/// # Arguments
///
/// * `log_dir` - Directory for log files (created if missing)
/// * `log_file` - Log filename inside `log_dir`
/// * `console_enabled` - Also write to stderr
/// * `debug` - Force `debug` level regardless of `RUST_LOG`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// truncated.
pub fn init_logging_with(
    log_dir: &str,
    log_file: &str,
    console_enabled: bool,
    debug: bool,
) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;

    let log_path = Path::new(log_dir).join(log_file);
    fs::write(&log_path, "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let console_layer = console_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(true)
            .compact()
    });

    let env_filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // A second initialisation in the same process is ignored
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Default log directory (`~/.geospawn/logs`).
pub fn default_log_dir() -> std::path::PathBuf {
    crate::config::config_directory().join("logs")
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    "geospawn.log"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_file(), "geospawn.log");
        assert!(default_log_dir().ends_with("logs"));
    }

    #[test]
    fn test_init_creates_and_truncates_file() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("nested/logs");
        let log_dir_str = log_dir.to_str().unwrap();

        fs::create_dir_all(&log_dir).unwrap();
        fs::write(log_dir.join("test.log"), "old session").unwrap();

        let _guard = init_logging_with(log_dir_str, "test.log", false, false).unwrap();

        let contents = fs::read_to_string(log_dir.join("test.log")).unwrap();
        assert!(!contents.contains("old session"));
    }

    #[test]
    fn test_init_fails_for_unwritable_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let nested = blocker.join("logs");
        let result = init_logging_with(nested.to_str().unwrap(), "test.log", false, false);
        assert!(result.is_err());
    }
}
