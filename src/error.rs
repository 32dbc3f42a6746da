//! Error types for race-results-dl
//!
//! One crate-wide [`Error`] covers configuration, transport, decoding and
//! output failures. Every variant maps to a stable, machine-readable code via
//! [`Error::error_code`] so the binary can print a short diagnostic.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for race-results-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for race-results-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "salt")
        key: Option<String>,
    },

    /// Transport-level failure talking to the results API
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The results API answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code returned by the server
        status: u16,
        /// Fully-qualified URL that was requested
        url: String,
    },

    /// JSON decoding or encoding failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A field the pipeline depends on is absent from an API payload
    #[error("missing field `{field}` in {context}")]
    MissingField {
        /// JSON key that was expected
        field: &'static str,
        /// Which payload was being read (e.g., "race 42 offset 50")
        context: String,
    },

    /// A split's cumulative time is not `H:MM:SS`
    #[error("invalid cumulative time {value:?} for split {split:?}: {reason}")]
    InvalidSplitTime {
        /// Split name as reported by the API
        split: String,
        /// Raw cumulative time string
        value: String,
        /// What was wrong with it
        reason: String,
    },

    /// Offline mode was asked for a page that was never cached
    #[error("no cached response at {}", path.display())]
    SnapshotMissing {
        /// Snapshot file that was expected
        path: PathBuf,
    },
}

impl Error {
    /// Shorthand for a configuration error tied to a key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Network(_) => "network_error",
            Error::Http { .. } => "http_error",
            Error::Serialization(_) => "serialization_error",
            Error::Csv(_) => "csv_error",
            Error::Io(_) => "io_error",
            Error::MissingField { .. } => "missing_field",
            Error::InvalidSplitTime { .. } => "invalid_split_time",
            Error::SnapshotMissing { .. } => "snapshot_missing",
        }
    }

    /// Process exit code used by the binary
    ///
    /// Configuration problems exit with 2 so wrappers can tell "fix your
    /// settings" apart from a failed run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config { .. } => 2,
            _ => 1,
        }
    }
}
