//! # Submission Orchestrator Service
//!
//! Fans a batch out across the six partitions and joins every task before
//! reporting.
//!
//! ## Architecture
//!
//! This service:
//! 1. Plans every unit synchronously (ids, records, arguments)
//! 2. Spawns one task per stage create and one chained task per aggregate
//! 3. Bounds in-flight submissions with a semaphore
//! 4. Joins every task handle, turning panics into failed outcomes

mod progress;
mod task;
mod update;

pub use progress::{Progress, ProgressSnapshot};

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use cc_02_ledger_gateway::LedgerGateway;
use shared_types::Partition;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, instrument, warn};

use crate::domain::batch::{BatchInput, UnitPlan};
use crate::domain::config::{AggregateDefaults, OrchestratorConfig};
use crate::domain::errors::{BatchError, SubmissionFailure};
use crate::domain::report::{BatchReport, SubmissionKind, SubmissionOutcome};
use crate::ports::outbound::IdGenerator;
use task::{Job, TaskContext};

/// Identity of a spawned task, kept outside the task so a panic can still
/// be attributed.
#[derive(Debug, Clone)]
struct TaskLabel {
    unit: usize,
    partition: Partition,
    record_id: String,
    kind: SubmissionKind,
}

/// The Submission Orchestrator.
pub struct SubmissionOrchestrator {
    gateway: Arc<dyn LedgerGateway>,
    ids: Arc<dyn IdGenerator>,
    config: OrchestratorConfig,
    defaults: AggregateDefaults,
    progress: Arc<Progress>,
}

impl SubmissionOrchestrator {
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        ids: Arc<dyn IdGenerator>,
        config: OrchestratorConfig,
        defaults: AggregateDefaults,
    ) -> Self {
        Self {
            gateway,
            ids,
            config,
            defaults,
            progress: Arc::new(Progress::default()),
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Counters across every pass this orchestrator has run.
    pub fn progress(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }

    /// Plan `units` units. Draws one id suffix per unit.
    pub fn plan(&self, input: &BatchInput, units: usize) -> Result<Vec<UnitPlan>, BatchError> {
        input.validate()?;
        if self.defaults.base_ids.is_empty() {
            return Err(BatchError::NoAggregateIds);
        }
        (0..units)
            .map(|unit| {
                let suffix = self.ids.next_suffix();
                input.plan_unit(
                    unit,
                    &suffix,
                    &self.defaults,
                    self.config.aggregate_appends,
                )
            })
            .collect()
    }

    fn context(&self) -> Arc<TaskContext> {
        Arc::new(TaskContext {
            gateway: Arc::clone(&self.gateway),
            permits: Semaphore::new(self.config.permits()),
            config: self.config.clone(),
            progress: Arc::clone(&self.progress),
        })
    }

    /// Submit `units` units drawn from `input` and wait for every
    /// submission to reach a terminal state.
    ///
    /// Per-submission failures are reported, never returned; `Err` means
    /// the batch could not be planned.
    #[instrument(skip(self, input), fields(max_in_flight = self.config.max_in_flight))]
    pub async fn submit_batch(
        &self,
        input: &BatchInput,
        units: usize,
    ) -> Result<BatchReport, BatchError> {
        let started = Instant::now();
        let plans = self.plan(input, units)?;
        info!(
            "[cc-03] Submitting batch of {} units ({} aggregate appends each)",
            units, self.config.aggregate_appends
        );

        let context = self.context();
        let mut tasks = Vec::with_capacity(plans.len() * 5);
        for plan in plans {
            for submission in plan.stage_submissions() {
                let label = TaskLabel {
                    unit: submission.unit,
                    partition: submission.partition,
                    record_id: submission.record_id.clone(),
                    kind: SubmissionKind::Create,
                };
                let context = Arc::clone(&context);
                let handle =
                    tokio::spawn(async move { vec![context.run(Job::create(submission)).await] });
                self.progress.task_spawned();
                tasks.push((label, handle));
            }

            let aggregate = plan.aggregate_submission();
            let label = TaskLabel {
                unit: aggregate.unit,
                partition: aggregate.partition,
                record_id: aggregate.record_id.clone(),
                kind: SubmissionKind::Create,
            };
            let context = Arc::clone(&context);
            let appends = plan.appends;
            let handle =
                tokio::spawn(async move { context.aggregate_chain(aggregate, appends).await });
            self.progress.task_spawned();
            tasks.push((label, handle));
        }

        let outcomes = self.join_all(tasks).await;
        let mut report = BatchReport {
            units,
            outcomes,
            elapsed: started.elapsed(),
        };
        report.sort();
        info!(
            "[cc-03] Batch finished in {:.3}s: {}",
            report.elapsed.as_secs_f64(),
            report.summary()
        );
        Ok(report)
    }

    /// Join barrier: waits for every handle, converting a panicked or
    /// cancelled task into a failed outcome attributed to its label.
    async fn join_all(
        &self,
        tasks: Vec<(TaskLabel, JoinHandle<Vec<SubmissionOutcome>>)>,
    ) -> Vec<SubmissionOutcome> {
        let mut outcomes = Vec::with_capacity(tasks.len());
        for (label, handle) in tasks {
            match handle.await {
                Ok(finished) => outcomes.extend(finished),
                Err(err) => {
                    let failure = join_failure(err);
                    warn!(
                        "[cc-03] Task for {} on {} did not finish: {}",
                        label.record_id, label.partition, failure
                    );
                    self.progress.record(false);
                    outcomes.push(SubmissionOutcome {
                        unit: label.unit,
                        partition: label.partition,
                        record_id: label.record_id,
                        kind: label.kind,
                        attempts: 0,
                        transaction_id: None,
                        result: Err(failure),
                    });
                }
            }
            self.progress.task_joined();
        }
        outcomes
    }
}

fn join_failure(err: JoinError) -> SubmissionFailure {
    if err.is_panic() {
        SubmissionFailure::TaskPanicked(panic_message(err.into_panic()))
    } else {
        SubmissionFailure::Cancelled
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
