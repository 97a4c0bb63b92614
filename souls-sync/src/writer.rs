//! Write mode: content-gated atomic writer.
//!
//! ## `write_document`: per-file protocol
//!
//! 1. Read what is on disk, byte-for-byte.
//! 2. Identical content → `Unchanged`, nothing touched.
//! 3. Ensure the parent directory exists.
//! 4. Write to `<path>.souls.tmp`.
//! 5. Rename to the final path (atomic on POSIX).
//!
//! Files are independent: [`write_all`] records a failure for one path and
//! carries on with the rest. There is no rollback.

use std::path::{Path, PathBuf};

use souls_renderer::{DocumentKind, RenderedDocument};

use crate::disk::{read_on_disk, OnDisk};
use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual document write. Paths are repository-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist and was written.
    Created { path: PathBuf },
    /// File existed with different content and was overwritten.
    Updated { path: PathBuf },
    /// File already held exactly the rendered content.
    Unchanged { path: PathBuf },
    /// Writing this file failed; other files were still attempted.
    Failed { path: PathBuf, error: String },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Created { path }
            | WriteResult::Updated { path }
            | WriteResult::Unchanged { path }
            | WriteResult::Failed { path, .. } => path,
        }
    }
}

/// Aggregate of a write-mode run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub writes: Vec<WriteResult>,
    /// Documents per [`DocumentKind`], in [`DocumentKind::all`] order.
    pub per_kind: Vec<(DocumentKind, usize)>,
}

impl GenerateReport {
    pub fn total(&self) -> usize {
        self.writes.len()
    }

    pub fn created(&self) -> usize {
        self.count(|w| matches!(w, WriteResult::Created { .. }))
    }

    pub fn updated(&self) -> usize {
        self.count(|w| matches!(w, WriteResult::Updated { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|w| matches!(w, WriteResult::Unchanged { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|w| matches!(w, WriteResult::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&WriteResult) -> bool) -> usize {
        self.writes.iter().filter(|w| pred(w)).count()
    }
}

// ---------------------------------------------------------------------------
// write_document
// ---------------------------------------------------------------------------

/// Reconcile one rendered document with disk under `root`.
pub fn write_document(root: &Path, doc: &RenderedDocument) -> Result<WriteResult, SyncError> {
    let full = root.join(&doc.path);
    let tmp = PathBuf::from(format!("{}.souls.tmp", full.display()));
    let rel = doc.path.clone();

    let created = match write_with_tmp(&full, &doc.content, &tmp)? {
        Outcome::Unchanged => {
            tracing::debug!("unchanged: {}", rel.display());
            return Ok(WriteResult::Unchanged { path: rel });
        }
        Outcome::Created => true,
        Outcome::Updated => false,
    };

    tracing::info!("wrote: {}", rel.display());
    Ok(if created {
        WriteResult::Created { path: rel }
    } else {
        WriteResult::Updated { path: rel }
    })
}

enum Outcome {
    Created,
    Updated,
    Unchanged,
}

fn write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<Outcome, SyncError> {
    let outcome = match read_on_disk(path)? {
        OnDisk::Text(existing) if existing == content => return Ok(Outcome::Unchanged),
        OnDisk::Missing => Outcome::Created,
        OnDisk::Text(_) | OnDisk::NotUtf8(_) => Outcome::Updated,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// write_all
// ---------------------------------------------------------------------------

/// Write every document, best-effort. Failures become [`WriteResult::Failed`].
pub fn write_all(root: &Path, docs: &[RenderedDocument]) -> GenerateReport {
    let writes = docs
        .iter()
        .map(|doc| {
            write_document(root, doc).unwrap_or_else(|err| {
                tracing::warn!(path = %doc.path.display(), error = %err, "write failed");
                WriteResult::Failed {
                    path: doc.path.clone(),
                    error: err.to_string(),
                }
            })
        })
        .collect();

    GenerateReport {
        writes,
        per_kind: count_per_kind(docs),
    }
}

pub(crate) fn count_per_kind(docs: &[RenderedDocument]) -> Vec<(DocumentKind, usize)> {
    DocumentKind::all()
        .iter()
        .map(|kind| (*kind, docs.iter().filter(|d| d.kind == *kind).count()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use souls_core::AgentSlug;
    use std::fs;
    use tempfile::TempDir;

    fn doc(rel: &str, content: &str) -> RenderedDocument {
        RenderedDocument {
            kind: DocumentKind::AgentWrapper,
            slug: AgentSlug::from("nav"),
            path: PathBuf::from(rel),
            content: content.to_string(),
        }
    }

    #[test]
    fn first_write_returns_created() {
        let root = TempDir::new().unwrap();
        let result = write_document(root.path(), &doc(".claude/agents/nav.md", "hello")).unwrap();
        assert!(matches!(result, WriteResult::Created { .. }));
        assert_eq!(fs::read_to_string(root.path().join(".claude/agents/nav.md")).unwrap(), "hello");
    }

    #[test]
    fn second_write_same_content_returns_unchanged() {
        let root = TempDir::new().unwrap();
        let d = doc("file.md", "same content");
        write_document(root.path(), &d).unwrap();
        let result = write_document(root.path(), &d).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn changed_content_returns_updated() {
        let root = TempDir::new().unwrap();
        write_document(root.path(), &doc("file.md", "v1")).unwrap();
        let result = write_document(root.path(), &doc("file.md", "v2")).unwrap();
        assert!(matches!(result, WriteResult::Updated { .. }));
        assert_eq!(fs::read_to_string(root.path().join("file.md")).unwrap(), "v2");
    }

    #[test]
    fn crlf_on_disk_is_rewritten() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("file.md"), "line1\r\nline2\r\n").unwrap();
        let result = write_document(root.path(), &doc("file.md", "line1\nline2\n")).unwrap();
        assert!(matches!(result, WriteResult::Updated { .. }));
        assert_eq!(fs::read_to_string(root.path().join("file.md")).unwrap(), "line1\nline2\n");
    }

    #[test]
    fn crlf_in_rendered_content_is_written_verbatim() {
        let root = TempDir::new().unwrap();
        let d = doc("file.md", "plans\r\nflight paths\n");
        write_document(root.path(), &d).unwrap();
        assert_eq!(
            fs::read(root.path().join("file.md")).unwrap(),
            b"plans\r\nflight paths\n"
        );
        let again = write_document(root.path(), &d).unwrap();
        assert!(matches!(again, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let root = TempDir::new().unwrap();
        write_document(root.path(), &doc("clean.md", "data")).unwrap();
        let tmp_path = PathBuf::from(format!("{}.souls.tmp", root.path().join("clean.md").display()));
        assert!(!tmp_path.exists(), ".souls.tmp must be cleaned up");
    }

    #[test]
    fn creates_parent_directories() {
        let root = TempDir::new().unwrap();
        write_document(root.path(), &doc(".agents/skills/nav/SKILL.md", "content")).unwrap();
        assert!(root.path().join(".agents/skills/nav/SKILL.md").exists());
    }

    #[test]
    fn one_failure_does_not_block_the_others() {
        let root = TempDir::new().unwrap();
        // A regular file where a directory is needed makes the first write fail.
        fs::write(root.path().join("blocker"), "not a dir").unwrap();
        let docs = vec![doc("blocker/nav.md", "x"), doc("ok.md", "y")];

        let report = write_all(root.path(), &docs);
        assert!(matches!(report.writes[0], WriteResult::Failed { .. }));
        assert!(matches!(report.writes[1], WriteResult::Created { .. }));
        assert_eq!(report.failed(), 1);
        assert_eq!(report.created(), 1);
        assert!(root.path().join("ok.md").exists());
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("file.md");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("file.md.souls.tmp");

        let result = write_with_tmp(&path, "new content", &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Running as root bypasses directory permissions; only assert when denied.
        if result.is_err() {
            assert_eq!(fs::read_to_string(&path).unwrap(), "original");
            assert!(!tmp_path.exists(), ".souls.tmp should be cleaned up");
        }
    }
}
