//! # Verification Report
//!
//! Result of checking every main chain aggregate.

use std::fmt;
use std::time::Duration;

/// Why an aggregate failed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationIssue {
    /// The record has an empty id.
    MissingId,
    /// The telemetry log is empty.
    EmptyTelemetry,
}

impl fmt::Display for VerificationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationIssue::MissingId => f.write_str("missing id"),
            VerificationIssue::EmptyTelemetry => f.write_str("empty telemetry log"),
        }
    }
}

/// Outcome of a verify-all pass.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub checked: usize,
    /// Total telemetry samples across every aggregate.
    pub samples: usize,
    /// `(record id, issue)` for each failed check.
    pub issues: Vec<(String, VerificationIssue)>,
    pub elapsed: Duration,
}

impl VerificationReport {
    pub fn verified(&self) -> usize {
        self.checked - self.failed()
    }

    /// Aggregates with at least one issue.
    pub fn failed(&self) -> usize {
        let mut ids: Vec<&str> = self.issues.iter().map(|(id, _)| id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "verified {} of {} aggregates ({} telemetry samples) in {:.3}s",
            self.verified(),
            self.checked,
            self.samples,
            self.elapsed.as_secs_f64()
        )?;
        for (id, issue) in &self.issues {
            writeln!(f, "  {id:?}: {issue}")?;
        }
        Ok(())
    }
}
