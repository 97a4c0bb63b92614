//! Scratch repository builder shared by the validator integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;

use souls_validator::cheatsheets;

pub fn agent_json(slug: &str, name: &str, domain: &str) -> Value {
    let p = |s: &str| format!("agents/{slug}/{s}");
    json!({
        "name": name,
        "slug": slug,
        "domain": domain,
        "role": "Specialist",
        "description": format!("Helps with {slug} work"),
        "model": "large",
        "capabilities": ["analysis"],
        "paths": {
            "core": p("CORE.md"),
            "cheatsheets": p("cheatsheets/"),
            "cheatsheet_index": p("cheatsheets/_index.md"),
            "memory": p("memory/"),
            "mistakes": p("memory/mistakes.md"),
            "session_log": p("memory/session-log.md"),
            "decisions": p("memory/decisions.md")
        }
    })
}

pub fn write(root: &Path, rel: &str, content: impl AsRef<[u8]>) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write fixture");
}

pub fn write_manifest(root: &Path, schema: &str, agents: &[Value]) {
    let manifest = json!({ "schema_version": schema, "agents": agents });
    write(
        root,
        "agents/manifest.json",
        serde_json::to_string_pretty(&manifest).expect("serialize"),
    );
}

/// Hand-authored files for one agent: core, one cheatsheet, index, memory.
pub fn scaffold_agent(root: &Path, slug: &str, name: &str, domain: &str) {
    write(
        root,
        &format!("agents/{slug}/CORE.md"),
        format!("---\nagent_name: \"{name}\"\ndomain: {domain}\nrole: Specialist\nmodel: large\n---\n\n# {name}\n"),
    );
    write(
        root,
        &format!("agents/{slug}/cheatsheets/basics.md"),
        "---\ntopic: \"Basics\"\nconfidence: VERIFIED\nlast_updated: \"2025-01-01\"\n---\n\n# Basics\n",
    );
    for file in ["mistakes.md", "session-log.md", "decisions.md"] {
        write(root, &format!("agents/{slug}/memory/{file}"), "# Log\n");
    }
    rebuild_index(root, slug);
}

pub fn rebuild_index(root: &Path, slug: &str) {
    let dir = root.join(format!("agents/{slug}/cheatsheets"));
    let index = cheatsheets::build_index_content(&dir).expect("index");
    fs::write(dir.join("_index.md"), index).expect("write index");
}

pub fn framework_skills(root: &Path) {
    for skill in ["summon", "session-end", "learn"] {
        write(
            root,
            &format!(".claude/skills/{skill}/SKILL.md"),
            format!("---\nname: {skill}\ndescription: \"The {skill} skill\"\n---\n\n# {skill}\n"),
        );
    }
}

/// A fully valid two-agent repository with generated documents in place.
pub fn valid_repo() -> TempDir {
    let dir = TempDir::new().expect("root");
    let root = dir.path();

    let mut nav = agent_json("nav", "Nav", "aerospace");
    nav["skills"] = json!(["summon"]);
    let sage = agent_json("sage", "Sage", "research");
    write_manifest(root, "2.0", &[nav, sage]);

    scaffold_agent(root, "nav", "Nav", "aerospace");
    scaffold_agent(root, "sage", "Sage", "research");
    framework_skills(root);
    souls_sync::generate_at(root).expect("generate");
    dir
}
