//! Check 1: the manifest envelope and every agent record.

use std::collections::BTreeSet;
use std::path::Path;

use souls_core::manifest::{self, AgentRecord, Manifest};
use souls_core::{layout, Agent, ManifestError};

use crate::checks::v2;
use crate::report::{FindingKind, Report};

pub const NAME: &str = "manifest";

/// Load and vet the manifest.
///
/// Returns `None` when the manifest itself cannot be loaded. Otherwise returns
/// the manifest plus the agents that decoded cleanly; records with missing
/// fields, undecodable values or a repeated slug are reported and left out.
pub fn run(root: &Path, report: &mut Report) -> Option<(Manifest, Vec<Agent>)> {
    let mut scope = report.scope(NAME);

    let manifest = match manifest::load_at(&layout::manifest_path(root)) {
        Ok(manifest) => manifest,
        Err(err) => {
            let (kind, message) = describe_load_failure(&err);
            scope.fail(kind, message);
            return None;
        }
    };

    let mut seen = BTreeSet::new();
    let mut agents = Vec::with_capacity(manifest.records.len());
    for record in &manifest.records {
        let label = record.label();
        let missing = record.missing_fields();
        for field in &missing {
            let message = if field.starts_with("paths.") {
                format!("Agent '{label}' missing {field}")
            } else {
                format!("Agent '{label}' missing required field: {field}")
            };
            scope.fail(FindingKind::FieldMissing, message);
        }
        if !missing.is_empty() {
            continue;
        }

        match record.to_agent() {
            Ok(agent) => {
                if seen.insert(agent.slug.clone()) {
                    agents.push(agent);
                } else {
                    scope.fail(
                        FindingKind::Malformed,
                        format!("Duplicate slug '{}'", agent.slug),
                    );
                }
            }
            // v2-fields reports these itself.
            Err(_) if fails_only_on_v2_values(&manifest, record) => {}
            Err(err) => {
                let detail = match err {
                    ManifestError::InvalidAgent { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                scope.fail(
                    FindingKind::Malformed,
                    format!("Agent '{label}' cannot be parsed: {detail}"),
                );
            }
        }
    }

    scope.pass_if_clean(format!("Valid manifest with {} agents", agents.len()));
    Some((manifest, agents))
}

/// True when the record's only decode problems are v2 value violations.
fn fails_only_on_v2_values(manifest: &Manifest, record: &AgentRecord) -> bool {
    manifest.is_v2()
        && !v2::value_violations(record).is_empty()
        && v2::without_v2_fields(record).to_agent().is_ok()
}

fn describe_load_failure(err: &ManifestError) -> (FindingKind, String) {
    let rel = layout::display_rel(&layout::manifest_rel());
    match err {
        ManifestError::NotFound { .. } => (FindingKind::NotFound, format!("{rel} not found")),
        ManifestError::Encoding { source, .. } => {
            (FindingKind::EncodingError, format!("Not valid UTF-8: {source}"))
        }
        ManifestError::Io { source, .. } => {
            (FindingKind::EncodingError, format!("Cannot read {rel}: {source}"))
        }
        ManifestError::Parse { source, .. } => {
            (FindingKind::Malformed, format!("Invalid JSON: {source}"))
        }
        ManifestError::FieldMissing { field, .. } => {
            (FindingKind::FieldMissing, format!("Missing '{field}' field"))
        }
        other => (FindingKind::Malformed, other.to_string()),
    }
}
