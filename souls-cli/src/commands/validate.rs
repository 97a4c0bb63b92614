//! `souls validate`: run every repository check.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use souls_validator::{validate_at, Finding, Report, Severity, Summary, ValidateOptions};

use super::exit_status;

/// Arguments for `souls validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Read-only mode (the default). Accepted alongside --fix.
    #[arg(long)]
    pub check: bool,

    /// Regenerate missing or stale cheatsheet _index.md files.
    #[arg(long)]
    pub fix: bool,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    root: String,
    findings: &'a [Finding],
    summary: Summary,
    ok: bool,
}

impl ValidateArgs {
    pub fn run(self, root: &Path) -> Result<ExitCode> {
        let report = validate_at(root, ValidateOptions { fix: self.fix });

        if self.json {
            let payload = ReportJson {
                root: root.display().to_string(),
                findings: &report.findings,
                summary: report.summary(),
                ok: !report.has_failures(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize report JSON")?
            );
        } else {
            println!("Validating agent souls repository at: {}", root.display());
            println!();
            print_report(&report);
        }
        Ok(exit_status(report.has_failures()))
    }
}

fn tag(severity: Severity) -> ColoredString {
    match severity {
        Severity::Pass => severity.tag().green(),
        Severity::Warn => severity.tag().yellow(),
        Severity::Fail => severity.tag().red().bold(),
    }
}

fn print_report(report: &Report) {
    for finding in &report.findings {
        println!("  [{}] {}: {}", tag(finding.severity), finding.check, finding.message);
    }
    println!();
    let s = report.summary();
    println!(
        "Summary: {} checks — {} PASS, {} FAIL, {} WARN",
        s.total, s.pass, s.fail, s.warn
    );
}
