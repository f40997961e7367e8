//! Target document errors
//!
//! Failures reading or writing a target JSON document. Validation problems are
//! never reported here; they go into the editor's error map.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading or saving a target document
#[derive(Error, Debug)]
pub enum TargetError {
    /// The document could not be read or written
    #[error("Failed to access target file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// The document is not a valid target
    #[error("Invalid target JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for target document operations
pub type TargetResult<T> = Result<T, TargetError>;
