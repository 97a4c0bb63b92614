//! Checks 2 and 8: manifest paths exist on disk.

use std::path::Path;

use serde_json::Value;

use souls_core::manifest::{Manifest, REQUIRED_PATH_FIELDS};
use souls_core::{Agent, RepoPath};

use crate::report::{FindingKind, Report};

pub const PATH_RESOLUTION: &str = "path-resolution";
pub const MEMORY_STRUCTURE: &str = "memory-structure";

const MEMORY_FILES: &[&str] = &["session_log", "mistakes", "decisions"];

/// `/`-suffixed paths must be directories, all others regular files.
///
/// Covers the required path keys and any extra string-valued keys the
/// agent's manifest record carries under `paths`.
pub fn resolution(root: &Path, manifest: &Manifest, agents: &[Agent], report: &mut Report) {
    let mut scope = report.scope(PATH_RESOLUTION);
    for agent in agents {
        let mut entries: Vec<(String, RepoPath)> = agent
            .paths
            .entries()
            .into_iter()
            .map(|(key, path)| (key.to_string(), path.clone()))
            .collect();
        entries.extend(extra_paths(manifest, agent));

        for (key, path) in &entries {
            let full = path.resolve(root);
            let (ok, what) = if path.is_dir_ref() {
                (full.is_dir(), "directory")
            } else {
                (full.is_file(), "file")
            };
            if !ok {
                scope.fail(
                    FindingKind::NotFound,
                    format!("Agent '{}': {key} {what} not found: {path}", agent.slug),
                );
            }
        }
    }
    scope.pass_if_clean("All manifest paths resolve to existing files/directories");
}

/// String-valued `paths` entries beyond the required keys, in key order.
fn extra_paths(manifest: &Manifest, agent: &Agent) -> Vec<(String, RepoPath)> {
    let record = manifest
        .records
        .iter()
        .find(|r| r.get("slug").and_then(Value::as_str) == Some(agent.slug.0.as_str()));
    let Some(paths) = record.and_then(|r| r.get("paths")).and_then(Value::as_object) else {
        return Vec::new();
    };
    paths
        .iter()
        .filter(|(key, _)| !REQUIRED_PATH_FIELDS.contains(&key.as_str()))
        .filter_map(|(key, value)| Some((key.clone(), RepoPath::from(value.as_str()?))))
        .collect()
}

pub fn memory_structure(root: &Path, agents: &[Agent], report: &mut Report) {
    let mut scope = report.scope(MEMORY_STRUCTURE);
    for agent in agents {
        let entries = agent.paths.entries();
        for key in MEMORY_FILES {
            let Some((_, path)) = entries.iter().find(|(k, _)| k == key) else {
                continue;
            };
            if path.is_empty() {
                scope.fail(
                    FindingKind::FieldMissing,
                    format!("Agent '{}': missing paths.{key} in manifest", agent.slug),
                );
            } else if !path.resolve(root).is_file() {
                scope.fail(
                    FindingKind::NotFound,
                    format!("Agent '{}': {key} file not found: {path}", agent.slug),
                );
            }
        }
    }
    scope.pass_if_clean("All agents have required memory files");
}
