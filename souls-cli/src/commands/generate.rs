//! `souls generate`: write generated documents, or check them with `--check`.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use souls_core::layout::display_rel;
use souls_sync::{CheckReport, CheckStatus, GenerateReport, WriteResult};

use super::exit_status;

/// Arguments for `souls generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Verify on-disk files match the manifest instead of writing them.
    #[arg(long)]
    pub check: bool,

    /// With --check, print a unified diff for every file that would change.
    #[arg(long, requires = "check")]
    pub diff: bool,
}

impl GenerateArgs {
    pub fn run(self, root: &Path) -> Result<ExitCode> {
        if self.check {
            return self.run_check(root);
        }
        let report = souls_sync::generate_at(root)
            .with_context(|| format!("generation failed in {}", root.display()))?;
        print_generated(&report);
        Ok(exit_status(report.failed() > 0))
    }

    fn run_check(&self, root: &Path) -> Result<ExitCode> {
        let report = souls_sync::check_at(root)
            .with_context(|| format!("check failed in {}", root.display()))?;
        print_checked(&report);

        if self.diff && !report.is_clean() {
            println!();
            let diffs = souls_sync::diff_at(root).context("failed to compute diffs")?;
            for diff in diffs {
                print!("{}", diff.unified_diff);
                if !diff.unified_diff.ends_with('\n') {
                    println!();
                }
            }
        }
        Ok(exit_status(!report.is_clean()))
    }
}

fn print_generated(report: &GenerateReport) {
    println!(
        "Generated {} files ({} created, {} updated, {} unchanged)",
        report.total(),
        report.created(),
        report.updated(),
        report.unchanged()
    );
    for (kind, count) in &report.per_kind {
        println!("  - {}: {count} files", kind.pattern());
    }

    for write in &report.writes {
        if let WriteResult::Failed { path, error } = write {
            eprintln!("  {} {}: {error}", "FAILED:".red().bold(), display_rel(path));
        }
    }
    if report.failed() > 0 {
        println!("{} {} files could not be written", "FAIL:".red().bold(), report.failed());
    }
}

fn print_checked(report: &CheckReport) {
    for result in &report.results {
        let path = display_rel(&result.path);
        match &result.status {
            CheckStatus::Ok => {}
            CheckStatus::Missing => println!("  {} {path}", "MISSING:".yellow()),
            CheckStatus::Drifted { reason } => {
                println!("  {}   {path} ({reason})", "DRIFT:".red())
            }
        }
    }

    println!(
        "Checked {} files: {} ok, {} drifted, {} missing",
        report.total(),
        report.ok(),
        report.drifted(),
        report.missing()
    );
    if report.is_clean() {
        println!("{} All generated files match manifest.json", "OK:".green().bold());
    } else {
        println!(
            "{} Generated files are out of sync with manifest.json",
            "FAIL:".red().bold()
        );
        println!("Run: souls generate");
    }
}
