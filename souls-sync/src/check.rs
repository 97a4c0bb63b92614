//! Check mode: compare rendered documents with disk without writing.

use std::fmt;
use std::path::{Path, PathBuf};

use souls_core::layout::AUTO_GENERATED_MARKER;
use souls_renderer::RenderedDocument;

use crate::disk::{read_on_disk, OnDisk};

/// Why an existing file does not match its rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftReason {
    /// Readable text that differs from the rendered document.
    ContentDiffers,
    /// Differs, and the file lacks the auto-generation banner entirely.
    MarkerMissing,
    NotUtf8,
    /// Reading failed for a reason other than absence.
    Unreadable(String),
}

impl fmt::Display for DriftReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftReason::ContentDiffers => f.write_str("content differs from manifest"),
            DriftReason::MarkerMissing => f.write_str("Missing AUTO-GENERATED header"),
            DriftReason::NotUtf8 => f.write_str("not valid UTF-8"),
            DriftReason::Unreadable(err) => write!(f, "cannot read: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Drifted { reason: DriftReason },
    Missing,
}

/// Check-mode classification of one document. `path` is repository-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub path: PathBuf,
    pub status: CheckStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub results: Vec<CheckResult>,
}

impl CheckReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn ok(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Ok))
    }

    pub fn drifted(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Drifted { .. }))
    }

    pub fn missing(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Missing))
    }

    /// True when every document is present and identical.
    pub fn is_clean(&self) -> bool {
        self.drifted() == 0 && self.missing() == 0
    }

    fn count(&self, pred: impl Fn(&CheckStatus) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.status)).count()
    }
}

/// Classify one rendered document against its on-disk copy under `root`.
pub fn check_document(root: &Path, doc: &RenderedDocument) -> CheckResult {
    let full = root.join(&doc.path);
    let status = match read_on_disk(&full) {
        Ok(OnDisk::Missing) => CheckStatus::Missing,
        Ok(OnDisk::Text(actual)) if actual == doc.content => CheckStatus::Ok,
        Ok(OnDisk::Text(actual)) => {
            let reason = if actual.contains(AUTO_GENERATED_MARKER) {
                DriftReason::ContentDiffers
            } else {
                DriftReason::MarkerMissing
            };
            CheckStatus::Drifted { reason }
        }
        Ok(OnDisk::NotUtf8(_)) => {
            tracing::warn!("not UTF-8: {}", doc.path.display());
            CheckStatus::Drifted {
                reason: DriftReason::NotUtf8,
            }
        }
        Err(err) => {
            tracing::warn!("unreadable: {}: {err}", doc.path.display());
            CheckStatus::Drifted {
                reason: DriftReason::Unreadable(err.to_string()),
            }
        }
    };
    CheckResult {
        path: doc.path.clone(),
        status,
    }
}

pub fn check_all(root: &Path, docs: &[RenderedDocument]) -> CheckReport {
    CheckReport {
        results: docs.iter().map(|doc| check_document(root, doc)).collect(),
    }
}
