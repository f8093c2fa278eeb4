//! Error types for pagectl.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions up to [`AppError`], which `main` returns.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the binary
//!   - [`ControllerError`] - Rejected controller construction
//!   - [`DatasetError`] - Loading the local dataset behind the demo source
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - `std::io::Error` - Reading commands / writing output
//!
//! [`FetchError`] is not part of `AppError`. A failed fetch is stored in the
//! controller's snapshot for the consuming screen to render.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// The controller could not be built from the resolved configuration.
    #[error("Invalid controller configuration: {0}")]
    Controller(#[from] ControllerError),

    /// The dataset file could not be loaded.
    #[error("Failed to load dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// A config file exists but could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal I/O failed (stdin closed abnormally, stdout broken pipe).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a fetch capability.
///
/// This is the only runtime failure the list controller tolerates. The
/// controller never classifies or inspects it: whatever the source produced is
/// surfaced unchanged through the snapshot's `error` field, and `items` stays
/// at its last-known-good state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure (connection refused, timeout, worker died).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned status {code}: {message}")]
    Status {
        /// Status code as reported by the backend.
        code: u16,
        /// Backend-supplied message body or reason phrase.
        message: String,
    },

    /// The backend answered, but the body was not a valid page.
    #[error("Malformed page response: {0}")]
    Decode(String),
}

/// Errors constructing a list controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Page size must be positive; a zero limit would never make progress.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,
}

/// Errors loading a JSON dataset for the in-memory source.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use pagectl::model::error::DatasetError;
///
/// let err = DatasetError::NotFound { path: PathBuf::from("/tmp/families.json") };
/// assert!(err.to_string().contains("/tmp/families.json"));
/// ```
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset path does not exist.
    #[error("Dataset not found: {path}")]
    NotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// Reading the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("Invalid JSON in {path}: {reason}")]
    Parse {
        /// Path with invalid content.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Valid JSON, but neither an array nor an object with an `items` array.
    #[error("Dataset in {path} must be an array or an object with an \"items\" array")]
    NotAnArray {
        /// Path with unexpected shape.
        path: PathBuf,
    },
}
