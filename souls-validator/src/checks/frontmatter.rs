//! Checks 3, 4 and 9: frontmatter on hand-authored documents.

use std::path::Path;

use souls_core::frontmatter;
use souls_core::layout::{self, FRAMEWORK_SKILLS, REQUIRED_CORE_FRONTMATTER};
use souls_core::Agent;

use crate::cheatsheets;
use crate::report::{FindingKind, Report};

pub const CORE: &str = "core-frontmatter";
pub const CHEATSHEET: &str = "cheatsheet-frontmatter";
pub const SKILLS: &str = "skills-validation";

/// Read `path` as UTF-8, describing any failure.
pub(crate) fn read_text(path: &Path) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Core documents that exist must carry every required field, non-empty.
/// Missing core documents are path-resolution's concern.
pub fn core_documents(root: &Path, agents: &[Agent], report: &mut Report) {
    let mut scope = report.scope(CORE);
    for agent in agents {
        let path = agent.paths.core.resolve(root);
        if !path.is_file() {
            continue;
        }
        let slug = &agent.slug;

        let text = match read_text(&path) {
            Ok(text) => text,
            Err(e) => {
                scope.fail(
                    FindingKind::EncodingError,
                    format!("Agent '{slug}': Cannot read CORE.md: {e}"),
                );
                continue;
            }
        };
        let Some(fm) = frontmatter::parse(&text) else {
            scope.fail(
                FindingKind::Malformed,
                format!("Agent '{slug}': CORE.md has no YAML frontmatter"),
            );
            continue;
        };
        for field in REQUIRED_CORE_FRONTMATTER {
            if fm.get(*field).map_or(true, |v| v.is_empty()) {
                scope.fail(
                    FindingKind::FieldMissing,
                    format!("Agent '{slug}': CORE.md missing frontmatter field: {field}"),
                );
            }
        }
    }
    scope.pass_if_clean("All CORE.md files have required frontmatter");
}

/// Cheatsheets without frontmatter are warnings, never failures.
pub fn cheatsheet_documents(root: &Path, agents: &[Agent], report: &mut Report) {
    let mut scope = report.scope(CHEATSHEET);
    let mut checked = 0usize;
    for agent in agents {
        let dir = agent.paths.cheatsheets.resolve(root);
        if !dir.is_dir() {
            continue;
        }
        let files = match cheatsheets::list(&dir) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("cannot list {}: {e}", dir.display());
                continue;
            }
        };
        for path in files {
            checked += 1;
            let name = cheatsheets::file_name(&path);
            match read_text(&path) {
                Ok(text) if frontmatter::has_frontmatter(&text) => {}
                Ok(_) => scope.warn(
                    FindingKind::Malformed,
                    format!("Agent '{}': {name} has no YAML frontmatter", agent.slug),
                ),
                Err(e) => scope.warn(
                    FindingKind::EncodingError,
                    format!("Agent '{}': cannot read {name}: {e}", agent.slug),
                ),
            }
        }
    }
    scope.pass_if_clean(format!("All {checked} cheatsheets have frontmatter"));
}

/// Framework skills must exist with `name` and `description` in frontmatter.
pub fn framework_skills(root: &Path, report: &mut Report) {
    let mut scope = report.scope(SKILLS);
    for skill in FRAMEWORK_SKILLS {
        let rel = layout::framework_skill_rel(skill);
        let path = root.join(&rel);
        if !path.is_file() {
            scope.fail(
                FindingKind::NotFound,
                format!("Framework skill missing: {}", layout::display_rel(&rel)),
            );
            continue;
        }
        let text = match read_text(&path) {
            Ok(text) => text,
            Err(e) => {
                scope.fail(
                    FindingKind::EncodingError,
                    format!("Cannot read skill {skill}: {e}"),
                );
                continue;
            }
        };
        let Some(fm) = frontmatter::parse(&text) else {
            scope.fail(
                FindingKind::Malformed,
                format!("Skill '{skill}' has no YAML frontmatter"),
            );
            continue;
        };
        for key in ["name", "description"] {
            if !fm.contains_key(key) {
                scope.fail(
                    FindingKind::FieldMissing,
                    format!("Skill '{skill}' missing '{key}' in frontmatter"),
                );
            }
        }
    }
    scope.pass_if_clean(format!(
        "All {} framework skills valid",
        FRAMEWORK_SKILLS.len()
    ));
}
