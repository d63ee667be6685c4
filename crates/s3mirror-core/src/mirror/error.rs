//! Error type for the mirror workflow.

use std::path::PathBuf;
use thiserror::Error;

use crate::remote::StoreError;
use crate::sanitize::SanitizeError;

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    #[error("could not create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
