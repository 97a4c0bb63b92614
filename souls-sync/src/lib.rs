//! # souls-sync
//!
//! Disk reconciler for rendered agent documents.
//!
//! [`generate_at`] renders the manifest under a repository root and writes
//! each document only when its content changed. [`check_at`] performs the same
//! comparison read-only and reports drift; [`diff_at`] shows it as unified
//! diffs.

pub mod check;
pub mod diff;
pub mod disk;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use check::{CheckReport, CheckResult, CheckStatus, DriftReason};
pub use diff::FileDiff;
pub use error::SyncError;
pub use pipeline::{check_at, diff_at, generate_at, plan_at, run, Mode, Outcome, Plan};
pub use writer::{GenerateReport, WriteResult};
