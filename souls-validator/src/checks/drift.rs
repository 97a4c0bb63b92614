//! Check 7: generated documents match what `souls generate` would write.

use std::path::Path;

use souls_core::{layout, Agent};
use souls_renderer::Renderer;
use souls_sync::check::check_all;
use souls_sync::{CheckStatus, DriftReason};

use crate::report::{FindingKind, Report};

pub const NAME: &str = "generated-drift";

pub fn run(root: &Path, schema_version: &str, agents: &[Agent], report: &mut Report) {
    let mut scope = report.scope(NAME);

    let rendered = Renderer::new().and_then(|r| r.render_all(agents, schema_version));
    let documents = match rendered {
        Ok(documents) => documents,
        Err(e) => {
            scope.fail(FindingKind::Malformed, format!("Cannot render documents: {e}"));
            return;
        }
    };

    let checks = check_all(root, &documents);
    for result in &checks.results {
        let rel = layout::display_rel(&result.path);
        match &result.status {
            CheckStatus::Ok => {}
            CheckStatus::Missing => {
                scope.fail(FindingKind::NotFound, format!("Missing generated file: {rel}"))
            }
            CheckStatus::Drifted { reason } => {
                let (kind, message) = match reason {
                    DriftReason::NotUtf8 | DriftReason::Unreadable(_) => {
                        (FindingKind::EncodingError, format!("Cannot read {rel}: {reason}"))
                    }
                    DriftReason::MarkerMissing => (
                        FindingKind::ContentMismatch,
                        format!("Missing AUTO-GENERATED header: {rel}"),
                    ),
                    DriftReason::ContentDiffers => (
                        FindingKind::ContentMismatch,
                        format!("Content drift detected: {rel}"),
                    ),
                };
                scope.fail(kind, message);
            }
        }
    }
    scope.pass_if_clean(format!(
        "All {} generated files match manifest",
        checks.total()
    ));
}
