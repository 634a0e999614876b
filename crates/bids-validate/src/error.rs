//! Error types for BIDS download validation.
//!
//! Data-quality problems (missing files, bad checksums) are never errors:
//! they become failed checks in a [`ValidationResult`](crate::ValidationResult).
//! Most variants here cover setup bugs that must stop a run; the table
//! variants are reported by the dataset checks as failed checks.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised for malformed configuration, invalid patterns, or
/// unparseable tables.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// File pattern could not be compiled.
    #[error("invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for a dataset config.
    #[error("failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A BIDS tabular file could not be parsed.
    #[error("failed to parse table {path}: {source}")]
    TableParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A BIDS tabular file has no header row.
    #[error("table {path} has no header row")]
    TableHeader { path: PathBuf },

    /// Configuration parsed but violates a contract (empty names, bad digest).
    #[error("invalid dataset config '{dataset}': {reason}")]
    InvalidConfig { dataset: String, reason: String },
}

/// Result type for validation setup operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
