//! Check 6: every Markdown file in the repository decodes as UTF-8.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use souls_core::layout::{self, SKIPPED_DIRS};

use crate::report::{FindingKind, Report};

pub const NAME: &str = "utf8-validation";

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// Every `*.md` file under `root`, sorted, outside [`SKIPPED_DIRS`].
pub fn markdown_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && e.path().extension().is_some_and(|x| x == "md"))
        .map(DirEntry::into_path)
        .collect()
}

pub fn run(root: &Path, report: &mut Report) {
    let mut scope = report.scope(NAME);
    let files = markdown_files(root);
    for path in &files {
        let valid = match std::fs::read(path) {
            Ok(bytes) => std::str::from_utf8(&bytes).is_ok(),
            Err(e) => {
                tracing::warn!("cannot read {}: {e}", path.display());
                continue;
            }
        };
        if !valid {
            let rel = path.strip_prefix(root).unwrap_or(path);
            scope.fail(
                FindingKind::EncodingError,
                format!("Invalid UTF-8: {}", layout::display_rel(rel)),
            );
        }
    }
    scope.pass_if_clean(format!("All {} .md files are valid UTF-8", files.len()));
}
