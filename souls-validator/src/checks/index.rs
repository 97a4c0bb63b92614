//! Check 5: each cheatsheet `_index.md` lists exactly the files present.
//!
//! This is the only check allowed to repair anything: with `fix`, a missing
//! or mismatched index is rewritten from the expected table.

use std::path::Path;

use souls_core::Agent;

use crate::cheatsheets;
use crate::checks::frontmatter::read_text;
use crate::report::{FindingKind, Report};

pub const NAME: &str = "index-accuracy";

pub fn run(root: &Path, agents: &[Agent], fix: bool, report: &mut Report) {
    let mut scope = report.scope(NAME);
    let mut checked = 0usize;
    let mut fixed = 0usize;

    for agent in agents {
        let dir = agent.paths.cheatsheets.resolve(root);
        if !dir.is_dir() {
            continue;
        }
        checked += 1;
        let slug = &agent.slug;
        let index_path = agent.paths.cheatsheet_index.resolve(root);

        let expected = match cheatsheets::build_index_content(&dir) {
            Ok(expected) => expected,
            Err(e) => {
                scope.fail(
                    FindingKind::EncodingError,
                    format!("Agent '{slug}': cannot list cheatsheets: {e}"),
                );
                continue;
            }
        };

        let problem = if !index_path.is_file() {
            Some((FindingKind::NotFound, format!("Agent '{slug}': _index.md not found")))
        } else {
            match read_text(&index_path) {
                Ok(actual) => mismatch(&expected, &actual).map(|details| {
                    (
                        FindingKind::ContentMismatch,
                        format!("Agent '{slug}': _index.md file list mismatch ({details})"),
                    )
                }),
                Err(e) => Some((
                    FindingKind::EncodingError,
                    format!("Agent '{slug}': cannot read _index.md: {e}"),
                )),
            }
        };
        let Some((kind, message)) = problem else {
            continue;
        };

        if !fix {
            scope.fail(kind, message);
            continue;
        }
        match std::fs::write(&index_path, &expected) {
            Ok(()) => {
                tracing::info!("rewrote {}", index_path.display());
                fixed += 1;
            }
            Err(e) => scope.fail(
                FindingKind::NotFound,
                format!("Agent '{slug}': cannot write _index.md: {e}"),
            ),
        }
    }

    if fix && fixed > 0 {
        scope.pass(format!("Fixed {fixed} _index.md files"));
    } else {
        scope.pass_if_clean(format!("All {checked} _index.md files are accurate"));
    }
}

/// `missing: a.md; extra: b.md`, or `None` when the file sets agree.
fn mismatch(expected: &str, actual: &str) -> Option<String> {
    let expected = cheatsheets::expected_entries(expected);
    let actual = cheatsheets::actual_entries(actual);
    if expected == actual {
        return None;
    }
    let missing: Vec<&str> = expected.difference(&actual).map(String::as_str).collect();
    let extra: Vec<&str> = actual.difference(&expected).map(String::as_str).collect();

    let mut details = Vec::new();
    if !missing.is_empty() {
        details.push(format!("missing: {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        details.push(format!("extra: {}", extra.join(", ")));
    }
    Some(details.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sets_match() {
        let table = "| a.md | A | UNKNOWN | 2025-01-01 |\n";
        assert_eq!(mismatch(table, "| `a.md` | Anything |\n"), None);
    }

    #[test]
    fn details_list_missing_then_extra() {
        let expected = "| a.md | A |\n| b.md | B |\n";
        let actual = "| b.md | B |\n| z.md | Z |\n";
        assert_eq!(
            mismatch(expected, actual).as_deref(),
            Some("missing: a.md; extra: z.md")
        );
    }
}
