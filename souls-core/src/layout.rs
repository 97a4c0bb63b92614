//! Conventional repository locations.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   agents/manifest.json              (input)
//!   .claude/agents/<slug>.md          (generated agent wrapper)
//!   .agents/skills/<slug>/SKILL.md    (generated skill document)
//!   .claude/skills/<name>/SKILL.md    (hand-authored framework skills)
//! ```
//!
//! Every function here is pure path arithmetic; none touch the filesystem.

use std::path::{Path, PathBuf};

use crate::types::AgentSlug;

/// Substring every generated document carries; drift checks look for it.
pub const AUTO_GENERATED_MARKER: &str = "<!-- AUTO-GENERATED from agents/manifest.json";

/// Skills the framework itself ships; each must exist under `.claude/skills/`.
pub const FRAMEWORK_SKILLS: &[&str] = &["summon", "session-end", "learn"];

/// Frontmatter keys every hand-authored core identity document must fill in.
pub const REQUIRED_CORE_FRONTMATTER: &[&str] = &["agent_name", "domain", "role", "model"];

/// File name of the generated table inside each cheatsheet directory.
pub const CHEATSHEET_INDEX_FILE: &str = "_index.md";

/// Directory names never descended into when walking the repository.
pub const SKIPPED_DIRS: &[&str] = &[".git", "node_modules"];

/// `agents/manifest.json`
pub fn manifest_rel() -> PathBuf {
    Path::new("agents").join("manifest.json")
}

/// `<root>/agents/manifest.json`
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(manifest_rel())
}

/// `.claude/agents/<slug>.md`
pub fn agent_wrapper_rel(slug: &AgentSlug) -> PathBuf {
    Path::new(".claude").join("agents").join(format!("{}.md", slug.0))
}

/// `.agents/skills/<slug>/SKILL.md`
pub fn skill_doc_rel(slug: &AgentSlug) -> PathBuf {
    Path::new(".agents").join("skills").join(&slug.0).join("SKILL.md")
}

/// `.claude/skills/<name>/SKILL.md`
pub fn framework_skill_rel(name: &str) -> PathBuf {
    Path::new(".claude").join("skills").join(name).join("SKILL.md")
}

/// Forward-slash display form of a relative path, stable across platforms.
pub fn display_rel(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
