//! Reading the on-disk counterpart of a rendered document.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{io_err, SyncError};

/// What currently sits at a document's output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnDisk {
    Missing,
    /// UTF-8 content, byte-for-byte as stored.
    Text(String),
    /// Bytes that do not decode as UTF-8.
    NotUtf8(Vec<u8>),
}

/// Read `path`, classifying absence and undecodable content without erroring.
pub fn read_on_disk(path: &Path) -> Result<OnDisk, SyncError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(match String::from_utf8(bytes) {
            Ok(text) => OnDisk::Text(text),
            Err(e) => OnDisk::NotUtf8(e.into_bytes()),
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(OnDisk::Missing),
        Err(err) => Err(io_err(path, err)),
    }
}
