//! One-off migration: prepend frontmatter to cheatsheets that lack it.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use souls_core::{frontmatter, layout, manifest};

use crate::cheatsheets;
use crate::checks::frontmatter::read_text;
use crate::error::{io_err, ValidateError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Frontmatter was written.
    Migrated { topic: String },
    /// Dry run: frontmatter would be written.
    WouldMigrate { topic: String },
    AlreadyHasFrontmatter,
    /// The file could not be read; it was left alone.
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationEntry {
    /// Repository-relative path.
    pub path: PathBuf,
    pub outcome: MigrationOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub entries: Vec<MigrationEntry>,
}

impl MigrationReport {
    /// Files migrated, or that would be in a dry run.
    pub fn migrated(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    MigrationOutcome::Migrated { .. } | MigrationOutcome::WouldMigrate { .. }
                )
            })
            .count()
    }

    pub fn already_had_frontmatter(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == MigrationOutcome::AlreadyHasFrontmatter)
            .count()
    }
}

/// The block prepended to a cheatsheet, followed by one blank line.
pub fn frontmatter_block(topic: &str, today: NaiveDate) -> String {
    format!(
        "---\ntopic: \"{topic}\"\nconfidence: TEXTBOOK\nlast_updated: \"{}\"\nsource: training-session\n---\n\n",
        today.format("%Y-%m-%d")
    )
}

/// Scan every agent's cheatsheets; with `write`, prepend frontmatter where
/// missing. Agents whose records do not decode are skipped.
pub fn migrate_at(root: &Path, write: bool, today: NaiveDate) -> Result<MigrationReport, ValidateError> {
    let manifest = manifest::load_at(&layout::manifest_path(root))?;
    let mut report = MigrationReport::default();

    for record in &manifest.records {
        let agent = match record.to_agent() {
            Ok(agent) => agent,
            Err(e) => {
                tracing::warn!("skipping agent '{}': {e}", record.label());
                continue;
            }
        };
        let dir = agent.paths.cheatsheets.resolve(root);
        if !dir.is_dir() {
            continue;
        }

        for path in cheatsheets::list(&dir).map_err(|e| io_err(&dir, e))? {
            let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            let text = match read_text(&path) {
                Ok(text) => text,
                Err(e) => {
                    report.entries.push(MigrationEntry {
                        path: rel,
                        outcome: MigrationOutcome::Unreadable(e),
                    });
                    continue;
                }
            };
            if frontmatter::has_frontmatter(&text) {
                report.entries.push(MigrationEntry {
                    path: rel,
                    outcome: MigrationOutcome::AlreadyHasFrontmatter,
                });
                continue;
            }

            let topic = cheatsheets::fallback_topic(&text, &cheatsheets::file_name(&path));
            let outcome = if write {
                let updated = format!("{}{text}", frontmatter_block(&topic, today));
                std::fs::write(&path, updated).map_err(|e| io_err(&path, e))?;
                tracing::info!("migrated {}", rel.display());
                MigrationOutcome::Migrated { topic }
            } else {
                MigrationOutcome::WouldMigrate { topic }
            };
            report.entries.push(MigrationEntry { path: rel, outcome });
        }
    }
    Ok(report)
}
