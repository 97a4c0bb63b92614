//! Error types for souls-validator.
//!
//! Individual check failures are findings, not errors. These variants cover
//! the few operations that can abort outright.

use std::path::PathBuf;

use thiserror::Error;

use souls_core::ManifestError;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ValidateError {
    ValidateError::Io {
        path: path.into(),
        source,
    }
}
