//! `souls migrate`: prepend frontmatter to cheatsheets that lack it.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;

use souls_core::layout::display_rel;
use souls_validator::{migrate_at, MigrationOutcome};

/// Arguments for `souls migrate`.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Write changes to disk (default: dry run).
    #[arg(long)]
    pub write: bool,
}

impl MigrateArgs {
    pub fn run(self, root: &Path) -> Result<ExitCode> {
        println!("Scanning cheatsheets in: {}", root.display());
        println!();

        let today = Local::now().date_naive();
        let report = migrate_at(root, self.write, today).context("migration failed")?;

        for entry in &report.entries {
            let rel = display_rel(&entry.path);
            match &entry.outcome {
                MigrationOutcome::Migrated { topic } => {
                    println!("  {} {rel} — topic: '{topic}'", "[MIGRATED]".green())
                }
                MigrationOutcome::WouldMigrate { topic } => println!(
                    "  {}  {rel} — would add frontmatter, topic: '{topic}'",
                    "[DRY RUN]".cyan()
                ),
                MigrationOutcome::Unreadable(err) => {
                    println!("  {} {rel}: {err}", "[ERROR]".red())
                }
                MigrationOutcome::AlreadyHasFrontmatter => {}
            }
        }

        println!();
        println!(
            "Result: {} migrated, {} already had frontmatter",
            report.migrated(),
            report.already_had_frontmatter()
        );
        if !self.write && report.migrated() > 0 {
            println!("Run with --write to apply changes.");
        }
        Ok(ExitCode::SUCCESS)
    }
}
