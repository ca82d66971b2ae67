//! Error types for board operations

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a stored blob is not an acceptable location list.
///
/// These never reach the user: `store::load` collapses every variant into the
/// seed default.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("stored value is not valid JSON")]
    Syntax(#[source] serde_json::Error),

    #[error("stored value is not an array")]
    NotAnArray,

    #[error("stored array is empty")]
    Empty,

    #[error("record {index} does not have the location shape")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from a key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read storage file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write storage file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create storage directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not a JSON object of strings")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize locations")]
    Serialize(#[from] serde_json::Error),

    #[error("storage is unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("storage rejected write to '{key}': {reason}")]
    Rejected { key: String, reason: String },
}

/// Errors surfaced by the board's input operations
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("location index {index} out of range ({len} locations)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("wait was recorded but could not be saved")]
    Persist(#[source] StorageError),
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}
