//! Error types for the energy-guard validation engine.
//!
//! Data problems found in records are never errors: they become
//! [`Finding`](crate::core::Finding)s in the validation report. `GuardError`
//! covers the infrastructure around a run instead (reading files, decoding a
//! rule catalog, unsupported input formats).

use thiserror::Error;

/// The main error type for the energy-guard library.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from JSON (de)serialization outside of per-line record parsing.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV reader that prevents reading the file at all.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from data source operations.
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "CSV", "JSONL", "file")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error related to configuration, including invalid rule catalogs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input format could not be determined or is not supported.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, GuardError>`.
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<GuardError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(&f(), e.into()))
    }
}

fn wrap(msg: &str, err: GuardError) -> GuardError {
    match err {
        GuardError::Io(inner) => GuardError::Io(std::io::Error::new(
            inner.kind(),
            format!("{msg}: {inner}"),
        )),
        GuardError::Internal(inner) => GuardError::Internal(format!("{msg}: {inner}")),
        other => GuardError::Internal(format!("{msg}: {other}")),
    }
}
