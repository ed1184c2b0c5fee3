//! # Batch Reports
//!
//! Terminal outcome of every submission a batch issued.

use std::fmt;
use std::time::Duration;

use shared_types::Partition;

use super::errors::SubmissionFailure;

/// What a submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    /// `CreateAsset`.
    Create,
    /// Append number `seq` (1-based) to an aggregate's telemetry log.
    AppendTelemetry { seq: usize },
    /// Telemetry update issued by an update pass.
    UpdateTelemetry,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionKind::Create => f.write_str("create"),
            SubmissionKind::AppendTelemetry { seq } => write!(f, "append #{seq}"),
            SubmissionKind::UpdateTelemetry => f.write_str("update"),
        }
    }
}

/// Terminal state of one submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub unit: usize,
    pub partition: Partition,
    pub record_id: String,
    pub kind: SubmissionKind,
    /// Submissions sent, including retries.
    pub attempts: u32,
    /// Ledger-assigned id of the final attempt, when known.
    pub transaction_id: Option<String>,
    pub result: Result<(), SubmissionFailure>,
}

impl SubmissionOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&SubmissionFailure> {
        self.result.as_ref().err()
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unit {} {} {} on {}",
            self.unit,
            self.kind,
            self.record_id,
            self.partition.label()
        )?;
        match &self.result {
            Ok(()) => f.write_str(": ok"),
            Err(err) => write!(f, ": {err}"),
        }
    }
}

/// Every outcome of one batch or update pass.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Units planned (records listed, for an update pass).
    pub units: usize,
    pub outcomes: Vec<SubmissionOutcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.total() - self.failed()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &SubmissionOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    /// Outcomes addressed to `partition`.
    pub fn on_partition(&self, partition: Partition) -> impl Iterator<Item = &SubmissionOutcome> {
        self.outcomes
            .iter()
            .filter(move |o| o.partition == partition)
    }

    /// Aggregate ids whose create committed.
    pub fn created_aggregates(&self) -> Vec<&str> {
        self.on_partition(Partition::MainChain)
            .filter(|o| o.kind == SubmissionKind::Create && o.succeeded())
            .map(|o| o.record_id.as_str())
            .collect()
    }

    /// `K of N submissions failed`.
    pub fn summary(&self) -> String {
        format!("{} of {} submissions failed", self.failed(), self.total())
    }

    /// Submissions per second over the whole pass.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total() as f64 / secs
        } else {
            0.0
        }
    }

    pub(crate) fn sort(&mut self) {
        self.outcomes.sort_by(|a, b| {
            (a.unit, a.partition, a.kind_order())
                .cmp(&(b.unit, b.partition, b.kind_order()))
        });
    }
}

impl SubmissionOutcome {
    fn kind_order(&self) -> usize {
        match self.kind {
            SubmissionKind::Create => 0,
            SubmissionKind::AppendTelemetry { seq } => seq,
            SubmissionKind::UpdateTelemetry => 0,
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} units, {} submissions in {:.3}s ({:.2} tx/s)",
            self.units,
            self.total(),
            self.elapsed.as_secs_f64(),
            self.throughput()
        )?;
        for failure in self.failures() {
            writeln!(f, "  {failure}")?;
        }
        write!(f, "{}", self.summary())
    }
}
