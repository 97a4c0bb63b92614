//! End-to-end reconciler tests over a scratch repository.

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use souls_sync::{check_at, diff_at, generate_at, CheckStatus, DriftReason, WriteResult};

fn agent(slug: &str, name: &str, domain: &str) -> serde_json::Value {
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

fn write_manifest(root: &Path, agents: Vec<serde_json::Value>) {
    fs::create_dir_all(root.join("agents")).expect("mkdir agents");
    let manifest = json!({ "schema_version": "2.0", "agents": agents });
    fs::write(
        root.join("agents/manifest.json"),
        serde_json::to_string_pretty(&manifest).expect("serialize"),
    )
    .expect("write manifest");
}

fn two_agent_repo() -> TempDir {
    let root = TempDir::new().expect("root");
    write_manifest(
        root.path(),
        vec![agent("sage", "Sage", "research"), agent("nav", "Nav", "aerospace")],
    );
    root
}

#[test]
fn first_generate_creates_every_document() {
    let root = two_agent_repo();
    let report = generate_at(root.path()).expect("generate");

    assert_eq!(report.total(), 4);
    assert_eq!(report.created(), 4);
    assert!(root.path().join(".claude/agents/nav.md").is_file());
    assert!(root.path().join(".agents/skills/sage/SKILL.md").is_file());

    // Sorted order: aerospace before research.
    let first = report.writes[0].path().to_string_lossy().replace('\\', "/");
    assert_eq!(first, ".claude/agents/nav.md");
}

#[test]
fn second_generate_is_idempotent() {
    let root = two_agent_repo();
    generate_at(root.path()).expect("first");
    let report = generate_at(root.path()).expect("second");

    assert_eq!(report.updated(), 0);
    assert_eq!(report.created(), 0);
    assert_eq!(report.unchanged(), 4);
}

#[test]
fn write_then_check_is_clean() {
    let root = two_agent_repo();
    generate_at(root.path()).expect("generate");

    let report = check_at(root.path()).expect("check");
    assert!(report.is_clean());
    assert_eq!(report.ok(), 4);
    assert!(diff_at(root.path()).expect("diff").is_empty());
}

#[test]
fn check_reports_missing_and_drifted() {
    let root = two_agent_repo();
    generate_at(root.path()).expect("generate");

    fs::remove_file(root.path().join(".agents/skills/nav/SKILL.md")).expect("rm");
    let wrapper = root.path().join(".claude/agents/sage.md");
    let edited = format!("{}\nlocal edit\n", fs::read_to_string(&wrapper).expect("read"));
    fs::write(&wrapper, edited).expect("edit");

    let report = check_at(root.path()).expect("check");
    assert_eq!((report.ok(), report.drifted(), report.missing()), (2, 1, 1));

    let drifted = report
        .results
        .iter()
        .find(|r| matches!(r.status, CheckStatus::Drifted { .. }))
        .expect("drifted entry");
    assert!(drifted.path.ends_with("sage.md"));
    assert_eq!(
        drifted.status,
        CheckStatus::Drifted {
            reason: DriftReason::ContentDiffers
        }
    );

    let diffs = diff_at(root.path()).expect("diff");
    assert_eq!(diffs.len(), 2);
}

#[test]
fn manifest_edit_updates_only_affected_documents() {
    let root = two_agent_repo();
    generate_at(root.path()).expect("generate");

    let mut nav = agent("nav", "Nav", "aerospace");
    nav["permissionMode"] = json!("plan");
    write_manifest(root.path(), vec![agent("sage", "Sage", "research"), nav]);

    let report = generate_at(root.path()).expect("regenerate");
    let updated: Vec<String> = report
        .writes
        .iter()
        .filter(|w| matches!(w, WriteResult::Updated { .. }))
        .map(|w| w.path().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(updated, [".claude/agents/nav.md"]);
    assert!(fs::read_to_string(root.path().join(".claude/agents/nav.md"))
        .expect("read")
        .contains("permissionMode: plan"));
}

#[test]
fn undecodable_agent_aborts_generation() {
    let root = TempDir::new().expect("root");
    let mut nav = agent("nav", "Nav", "aerospace");
    nav["permissionMode"] = json!("yolo");
    write_manifest(root.path(), vec![nav]);

    assert!(generate_at(root.path()).is_err());
    assert!(!root.path().join(".claude").exists());
}

#[test]
fn carriage_returns_in_manifest_text_round_trip() {
    let root = TempDir::new().expect("root");
    let mut nav = agent("nav", "Nav", "aerospace");
    nav["description"] = json!("plans\r\nflight paths");
    write_manifest(root.path(), vec![nav]);

    generate_at(root.path()).expect("generate");
    let check = check_at(root.path()).expect("check");
    assert!(check.is_clean(), "write-then-check must be clean");

    let again = generate_at(root.path()).expect("second generate");
    assert_eq!(again.unchanged(), 2);
}

#[test]
fn crlf_rewrite_of_generated_file_is_drift_and_repaired() {
    let root = two_agent_repo();
    generate_at(root.path()).expect("generate");

    let wrapper = root.path().join(".claude/agents/nav.md");
    let lf = fs::read_to_string(&wrapper).expect("read");
    fs::write(&wrapper, lf.replace('\n', "\r\n")).expect("crlf");

    let check = check_at(root.path()).expect("check");
    assert_eq!((check.ok(), check.drifted()), (3, 1));

    let report = generate_at(root.path()).expect("repair");
    assert_eq!(report.updated(), 1);
    assert_eq!(fs::read_to_string(&wrapper).expect("reread"), lf);
}
