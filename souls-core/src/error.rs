//! Error types for souls-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading the manifest or turning its raw
/// records into typed agents.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file did not exist at the expected path.
    #[error("manifest not found at {path}")]
    NotFound { path: PathBuf },

    /// Underlying I/O failure other than "not found" (permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest bytes are not valid UTF-8 text.
    #[error("manifest at {path} is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// JSON syntax error: includes file path and line/column from serde_json.
    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Syntactically valid JSON with the wrong shape.
    #[error("malformed manifest: {message}")]
    Malformed { message: String },

    /// A required manifest-level or agent-level field is absent.
    #[error("{owner} missing required field: {field}")]
    FieldMissing { owner: String, field: String },

    /// An agent record has every required field but cannot be decoded
    /// (wrong value type, unknown enum value).
    #[error("agent '{slug}' is malformed: {source}")]
    InvalidAgent {
        slug: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two agent records share a slug.
    #[error("duplicate agent slug: {slug}")]
    DuplicateSlug { slug: String },
}

/// Convenience constructor for [`ManifestError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ManifestError {
    ManifestError::Io {
        path: path.into(),
        source,
    }
}
