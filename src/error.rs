//! Error types for the host seam and report generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while the host retrieves logs.
#[derive(Error, Debug)]
pub enum HostError {
    /// Log source path does not exist.
    #[error("log source not found: {0}")]
    NotFound(PathBuf),

    /// Log file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Log file content is not valid log JSON.
    #[error("invalid log data in {path} (line {line}): {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Query rejected by the host.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while handling a report call.
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request could not be interpreted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown report name.
    #[error("unknown report: {0}")]
    UnknownReport(String),
}
