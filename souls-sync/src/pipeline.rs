//! Shared pipeline entrypoint: load → sort → render → reconcile.
//!
//! Used by `souls generate` and by the validator's drift check, so both
//! see exactly the same rendered documents.

use std::path::Path;

use souls_core::{layout, manifest};
use souls_renderer::{RenderedDocument, Renderer};

use crate::check::{check_all, CheckReport};
use crate::diff::{diff_all, FileDiff};
use crate::writer::{write_all, GenerateReport};
use crate::SyncError;

/// Everything `generate` would produce for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub schema_version: String,
    /// Sorted agent order, then document kind.
    pub documents: Vec<RenderedDocument>,
}

/// Load the manifest under `root` and render every document.
///
/// Any manifest problem, including an agent that fails to decode, is fatal.
pub fn plan_at(root: &Path) -> Result<Plan, SyncError> {
    let manifest = manifest::load_at(&layout::manifest_path(root))?;
    let agents = manifest.agents()?;
    let renderer = Renderer::new()?;
    let documents = renderer.render_all(&agents, &manifest.schema_version)?;
    tracing::debug!(
        agents = agents.len(),
        documents = documents.len(),
        "rendered plan"
    );
    Ok(Plan {
        schema_version: manifest.schema_version,
        documents,
    })
}

/// Write mode.
pub fn generate_at(root: &Path) -> Result<GenerateReport, SyncError> {
    let plan = plan_at(root)?;
    Ok(write_all(root, &plan.documents))
}

/// Check mode. Never writes.
pub fn check_at(root: &Path) -> Result<CheckReport, SyncError> {
    let plan = plan_at(root)?;
    Ok(check_all(root, &plan.documents))
}

/// Unified diffs for every document `generate` would change.
pub fn diff_at(root: &Path) -> Result<Vec<FileDiff>, SyncError> {
    let plan = plan_at(root)?;
    diff_all(root, &plan.documents)
}

/// How a pipeline run treats disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    Check,
}

/// Result of [`run`], one variant per [`Mode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(GenerateReport),
    Checked(CheckReport),
}

/// Run the pipeline in `mode`.
pub fn run(root: &Path, mode: Mode) -> Result<Outcome, SyncError> {
    match mode {
        Mode::Write => generate_at(root).map(Outcome::Generated),
        Mode::Check => check_at(root).map(Outcome::Checked),
    }
}
