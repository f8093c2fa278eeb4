//! Tracing subscriber initialization.
//!
//! Logs go to a file so they never interleave with the command loop's
//! stdout. Follow them with `tail -f` in a separate terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Filter used when `RUST_LOG` is unset or unparseable.
///
/// An invalid `default_level` falls back to `info`.
pub fn fallback_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_new(default_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`; otherwise uses `default_level`. Creates the log
/// directory if it doesn't exist.
///
/// # Errors
///
/// Returns `LoggingError` if the subscriber was already initialized or the
/// directory could not be created.
pub fn init(log_path: &Path, default_level: &str) -> Result<(), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Err(LoggingError::NoParentDirectory(log_path.to_path_buf())),
    };

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let test_dir = std::env::temp_dir().join("pagectl_test_logs_create");
        let log_file = test_dir.join("test.log");
        let _ = fs::remove_dir_all(&test_dir);

        // May fail if another test already set the subscriber.
        let _ = init(&log_file, "debug");

        assert!(
            test_dir.exists(),
            "Log directory should be created: {:?}",
            test_dir
        );
        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn init_succeeds_when_directory_already_exists() {
        let test_dir = std::env::temp_dir().join("pagectl_test_logs_exists");
        let log_file = test_dir.join("test.log");
        let _ = fs::create_dir_all(&test_dir);

        let result = init(&log_file, "info");

        assert!(
            matches!(result, Ok(()) | Err(LoggingError::SubscriberAlreadySet)),
            "got {:?}",
            result
        );
        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn init_rejects_path_without_file_name() {
        let result = init(Path::new("/"), "info");
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }

    #[test]
    fn fallback_filter_accepts_directives() {
        let filter = fallback_filter("pagectl=trace,warn");
        assert!(filter.to_string().contains("pagectl=trace"));
    }

    #[test]
    fn fallback_filter_replaces_garbage_with_info() {
        let filter = fallback_filter("pagectl=notalevel");
        assert_eq!(filter.to_string(), "info");
    }
}
