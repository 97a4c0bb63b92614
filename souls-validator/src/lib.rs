//! Repository validation for an agent souls repository.
//!
//! [`validate_at`] runs the ten checks in a fixed order and accumulates every
//! finding into a [`Report`]. Only a manifest that cannot be loaded stops the
//! run early; everything else is reported and the remaining checks continue.

use std::path::Path;

pub mod cheatsheets;
pub mod checks;
pub mod error;
pub mod migrate;
pub mod report;

pub use error::ValidateError;
pub use migrate::{migrate_at, MigrationEntry, MigrationOutcome, MigrationReport};
pub use report::{Finding, FindingKind, Report, Severity, Summary};

/// Options for [`validate_at`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Rewrite missing or stale cheatsheet indexes instead of failing.
    pub fix: bool,
}

/// Validate the repository at `root`.
pub fn validate_at(root: &Path, options: ValidateOptions) -> Report {
    let mut report = Report::default();

    let Some((manifest, agents)) = checks::manifest::run(root, &mut report) else {
        return report;
    };
    tracing::debug!(
        records = manifest.records.len(),
        usable = agents.len(),
        "manifest loaded"
    );

    checks::paths::resolution(root, &manifest, &agents, &mut report);
    checks::frontmatter::core_documents(root, &agents, &mut report);
    checks::frontmatter::cheatsheet_documents(root, &agents, &mut report);
    checks::index::run(root, &agents, options.fix, &mut report);
    checks::utf8::run(root, &mut report);
    checks::drift::run(root, &manifest.schema_version, &agents, &mut report);
    checks::paths::memory_structure(root, &agents, &mut report);
    checks::frontmatter::framework_skills(root, &mut report);
    checks::v2::run(root, &manifest, &mut report);

    report
}
