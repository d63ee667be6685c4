//! Error type for object store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by an [`ObjectStore`](super::ObjectStore).
///
/// Transport failures are surfaced as-is; nothing in this crate retries them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("{operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        StoreError::Transport {
            operation,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
