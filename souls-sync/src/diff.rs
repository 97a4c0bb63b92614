//! Unified diffs between on-disk documents and what `generate` would write.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use souls_renderer::RenderedDocument;

use crate::disk::{read_on_disk, OnDisk};
use crate::SyncError;

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    /// Repository-relative path.
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diff one document against disk. `None` when the file already matches.
///
/// A missing file diffs against empty content. Non-UTF-8 content is shown
/// lossily decoded.
pub fn diff_document(root: &Path, doc: &RenderedDocument) -> Result<Option<FileDiff>, SyncError> {
    let existing = match read_on_disk(&root.join(&doc.path))? {
        OnDisk::Missing => String::new(),
        OnDisk::Text(text) => text,
        OnDisk::NotUtf8(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    };
    if existing == doc.content {
        return Ok(None);
    }

    let old_header = format!("a/{}", doc.path.display());
    let new_header = format!("b/{}", doc.path.display());
    let unified = TextDiff::from_lines(&existing, &doc.content)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(Some(FileDiff {
        path: doc.path.clone(),
        unified_diff: unified,
    }))
}

/// Diffs for every document that would change, in input order.
pub fn diff_all(root: &Path, docs: &[RenderedDocument]) -> Result<Vec<FileDiff>, SyncError> {
    let mut diffs = Vec::new();
    for doc in docs {
        if let Some(diff) = diff_document(root, doc)? {
            diffs.push(diff);
        }
    }
    Ok(diffs)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use souls_core::AgentSlug;
    use souls_renderer::DocumentKind;
    use tempfile::TempDir;

    use super::*;

    fn doc(content: &str) -> RenderedDocument {
        RenderedDocument {
            kind: DocumentKind::AgentWrapper,
            slug: AgentSlug::from("nav"),
            path: PathBuf::from(".claude/agents/nav.md"),
            content: content.to_string(),
        }
    }

    #[test]
    fn matching_file_has_no_diff() {
        let root = TempDir::new().expect("root");
        fs::create_dir_all(root.path().join(".claude/agents")).expect("mkdir");
        fs::write(root.path().join(".claude/agents/nav.md"), "a\nb\n").expect("write");
        assert!(diff_document(root.path(), &doc("a\nb\n")).expect("diff").is_none());
    }

    #[test]
    fn local_edit_produces_unified_diff() {
        let root = TempDir::new().expect("root");
        fs::create_dir_all(root.path().join(".claude/agents")).expect("mkdir");
        fs::write(root.path().join(".claude/agents/nav.md"), "a\nmanual tweak\n").expect("write");

        let diff = diff_document(root.path(), &doc("a\nb\n"))
            .expect("diff")
            .expect("some diff");
        assert!(diff.unified_diff.contains("--- a/.claude/agents/nav.md"));
        assert!(diff.unified_diff.contains("+++ b/.claude/agents/nav.md"));
        assert!(diff.unified_diff.contains("@@"));
        assert!(diff.unified_diff.contains("-manual tweak"));
        assert!(diff.unified_diff.contains("+b"));
    }

    #[test]
    fn missing_file_diffs_against_empty() {
        let root = TempDir::new().expect("root");
        let diffs = diff_all(root.path(), &[doc("line\n")]).expect("diff");
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].unified_diff.contains("+line"));
    }
}
