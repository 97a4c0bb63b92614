//! Check 10: schema v2 optional fields.

use std::path::Path;
use std::str::FromStr;

use serde_json::Value;

use souls_core::layout;
use souls_core::manifest::{AgentRecord, Manifest};
use souls_core::{IsolationMode, MemoryScope, PermissionMode};

use crate::report::{FindingKind, Report};

pub const NAME: &str = "v2-fields";

/// Optional per-agent fields introduced by schema 2.0.
pub const FIELDS: &[&str] = &["permissionMode", "tools", "memory", "isolation", "skills"];

/// `record` with every v2 field removed.
pub fn without_v2_fields(record: &AgentRecord) -> AgentRecord {
    let mut map = record.0.clone();
    for key in FIELDS {
        map.remove(*key);
    }
    AgentRecord(map)
}

/// Value-level problems with a record's v2 fields, as report messages.
///
/// Absent and `null` values are always acceptable.
pub fn value_violations(record: &AgentRecord) -> Vec<String> {
    let label = record.label();
    let mut out = Vec::new();

    if let Some(v) = present(record, "permissionMode") {
        if !parses::<PermissionMode>(v) {
            out.push(format!("Agent '{label}': invalid permissionMode '{}'", show(v)));
        }
    }
    if let Some(v) = present(record, "tools") {
        if !v.as_array().is_some_and(|items| items.iter().all(Value::is_string)) {
            out.push(format!("Agent '{label}': tools must be null or array"));
        }
    }
    if let Some(v) = present(record, "memory") {
        if !parses::<MemoryScope>(v) {
            out.push(format!("Agent '{label}': invalid memory scope '{}'", show(v)));
        }
    }
    if let Some(v) = present(record, "isolation") {
        if !parses::<IsolationMode>(v) {
            out.push(format!("Agent '{label}': invalid isolation mode '{}'", show(v)));
        }
    }
    if let Some(v) = present(record, "skills") {
        match v.as_array() {
            None => out.push(format!("Agent '{label}': skills must be an array")),
            Some(items) => {
                for item in items.iter().filter(|i| !i.is_string()) {
                    out.push(format!("Agent '{label}': skill ref {item} is not a string"));
                }
            }
        }
    }
    out
}

fn present<'a>(record: &'a AgentRecord, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

fn parses<T: FromStr>(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.parse::<T>().is_ok())
}

fn show(value: &Value) -> String {
    value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string())
}

pub fn run(root: &Path, manifest: &Manifest, report: &mut Report) {
    let mut scope = report.scope(NAME);
    if !manifest.is_v2() {
        scope.pass("Skipped (schema < 2.0)");
        return;
    }

    for record in &manifest.records {
        for message in value_violations(record) {
            scope.fail(FindingKind::Malformed, message);
        }

        let refs = record
            .get("skills")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str);
        for skill in refs {
            let rel = layout::framework_skill_rel(skill);
            if !root.join(&rel).is_file() {
                scope.fail(
                    FindingKind::ReferenceUnresolved,
                    format!(
                        "Agent '{}': skill ref '{skill}' does not resolve to {}",
                        record.label(),
                        layout::display_rel(&rel)
                    ),
                );
            }
        }
    }

    scope.pass_if_clean("All v2.0 fields valid and skill refs resolve");
}
