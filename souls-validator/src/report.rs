//! Findings and the accumulated validation report.

use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Severity / kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Pass,
    Warn,
    Fail,
}

impl Severity {
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Warn => "WARN",
            Severity::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// What went wrong, independent of which check noticed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FindingKind {
    NotFound,
    Malformed,
    EncodingError,
    FieldMissing,
    ReferenceUnresolved,
    ContentMismatch,
}

// ---------------------------------------------------------------------------
// Finding
// ---------------------------------------------------------------------------

/// One line of the validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub check: &'static str,
    /// Absent on PASS summaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FindingKind>,
    pub message: String,
}

impl Finding {
    pub fn pass(check: &'static str, message: impl Into<String>) -> Self {
        Finding {
            severity: Severity::Pass,
            check,
            kind: None,
            message: message.into(),
        }
    }

    pub fn warn(check: &'static str, kind: FindingKind, message: impl Into<String>) -> Self {
        Finding {
            severity: Severity::Warn,
            check,
            kind: Some(kind),
            message: message.into(),
        }
    }

    pub fn fail(check: &'static str, kind: FindingKind, message: impl Into<String>) -> Self {
        Finding {
            severity: Severity::Fail,
            check,
            kind: Some(kind),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// All findings of a run, in the order the checks produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub findings: Vec<Finding>,
}

/// Counts by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub warn: usize,
}

impl Report {
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Fail)
    }

    pub fn summary(&self) -> Summary {
        let count = |s: Severity| self.findings.iter().filter(|f| f.severity == s).count();
        Summary {
            total: self.findings.len(),
            pass: count(Severity::Pass),
            fail: count(Severity::Fail),
            warn: count(Severity::Warn),
        }
    }

    /// Findings recorded under `check`.
    pub fn for_check<'a>(&'a self, check: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.check == check)
    }

    /// Open a scope that records findings under `check`.
    pub(crate) fn scope(&mut self, check: &'static str) -> CheckScope<'_> {
        CheckScope {
            report: self,
            check,
            failures: 0,
            warnings: 0,
        }
    }
}

/// Records findings for one check and tracks whether it failed.
pub(crate) struct CheckScope<'a> {
    report: &'a mut Report,
    check: &'static str,
    failures: usize,
    warnings: usize,
}

impl CheckScope<'_> {
    pub(crate) fn fail(&mut self, kind: FindingKind, message: impl Into<String>) {
        self.failures += 1;
        self.report.push(Finding::fail(self.check, kind, message));
    }

    pub(crate) fn warn(&mut self, kind: FindingKind, message: impl Into<String>) {
        self.warnings += 1;
        self.report.push(Finding::warn(self.check, kind, message));
    }

    pub(crate) fn pass(&mut self, message: impl Into<String>) {
        self.report.push(Finding::pass(self.check, message));
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.failures == 0 && self.warnings == 0
    }

    /// Record `message` as a PASS when nothing failed or warned.
    pub(crate) fn pass_if_clean(&mut self, message: impl Into<String>) {
        if self.is_clean() {
            self.pass(message);
        }
    }
}
