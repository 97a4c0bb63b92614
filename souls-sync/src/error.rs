//! Error types for souls-sync.

use std::path::PathBuf;

use thiserror::Error;

use souls_core::ManifestError;
use souls_renderer::RenderError;

/// All errors that can arise from reconciling rendered documents with disk.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The manifest could not be loaded or decoded. Always fatal for a run.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
