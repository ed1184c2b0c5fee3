//! Per-task submission logic: permit acquisition, delivery, retries and the
//! sequential aggregate append chain.

use std::sync::Arc;

use cc_01_record_store::domain::telemetry_args;
use cc_02_ledger_gateway::{GatewayError, LedgerGateway};
use shared_types::{operations, Partition, TelemetrySample};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::progress::Progress;
use crate::domain::batch::PlannedSubmission;
use crate::domain::config::OrchestratorConfig;
use crate::domain::report::{SubmissionKind, SubmissionOutcome};

/// How a submission waits for its commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    /// `submit_transaction`.
    Blocking,
    /// `submit_async`, then wait on the commit watcher.
    Watched,
}

/// One state-changing call owned by exactly one task.
#[derive(Debug, Clone)]
pub(crate) struct Job {
    pub unit: usize,
    pub partition: Partition,
    pub record_id: String,
    pub kind: SubmissionKind,
    pub function: &'static str,
    pub args: Vec<String>,
    pub delivery: Delivery,
}

impl Job {
    pub fn create(submission: PlannedSubmission) -> Self {
        Self {
            unit: submission.unit,
            partition: submission.partition,
            record_id: submission.record_id,
            kind: SubmissionKind::Create,
            function: operations::CREATE,
            args: submission.args,
            delivery: Delivery::Blocking,
        }
    }
}

/// State shared by every task of a pass.
pub(crate) struct TaskContext {
    pub gateway: Arc<dyn LedgerGateway>,
    pub permits: Semaphore,
    pub config: OrchestratorConfig,
    pub progress: Arc<Progress>,
}

impl TaskContext {
    async fn attempt(&self, job: &Job) -> (Option<String>, Result<(), GatewayError>) {
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return (
                    None,
                    Err(GatewayError::Unavailable("submission pool closed".into())),
                )
            }
        };
        match job.delivery {
            Delivery::Blocking => {
                let result = self
                    .gateway
                    .submit_transaction(job.partition, job.function, &job.args)
                    .await;
                (None, result.map(|_| ()))
            }
            Delivery::Watched => {
                let (handle, watcher) = match self
                    .gateway
                    .submit_async(job.partition, job.function, &job.args)
                    .await
                {
                    Ok(submitted) => submitted,
                    Err(err) => return (None, Err(err)),
                };
                match watcher.status().await {
                    Ok(status) if status.successful => (Some(status.transaction_id), Ok(())),
                    Ok(status) => (
                        Some(status.transaction_id.clone()),
                        Err(GatewayError::Commit {
                            transaction_id: status.transaction_id,
                            code: status.code,
                        }),
                    ),
                    Err(err) => (Some(handle.transaction_id), Err(err)),
                }
            }
        }
    }

    /// Run a job to a terminal state. Only failures known to have written
    /// nothing are retried, and only from this task, so an id is never in
    /// flight twice and an append is never applied twice. An ambiguous
    /// outcome (timeout after hand-off to ordering) is reported as failed.
    pub async fn run(&self, job: Job) -> SubmissionOutcome {
        let mut attempts = 0u32;
        let (transaction_id, result) = loop {
            attempts += 1;
            let (transaction_id, result) = self.attempt(&job).await;
            match result {
                Err(err) if err.is_retry_safe() && attempts <= self.config.max_retries => {
                    warn!(
                        "[cc-03] Retrying {} {} on {} after attempt {}: {}",
                        job.kind, job.record_id, job.partition, attempts, err
                    );
                    tokio::time::sleep(self.config.retry_backoff()).await;
                }
                result => break (transaction_id, result),
            }
        };

        match &result {
            Ok(()) => debug!(
                "[cc-03] unit {} {} {} committed on {}",
                job.unit, job.kind, job.record_id, job.partition
            ),
            Err(err) => warn!(
                "[cc-03] unit {} {} {} failed on {}: {}",
                job.unit, job.kind, job.record_id, job.partition, err
            ),
        }
        self.progress.record(result.is_ok());

        SubmissionOutcome {
            unit: job.unit,
            partition: job.partition,
            record_id: job.record_id,
            kind: job.kind,
            attempts,
            transaction_id,
            result: result.map_err(Into::into),
        }
    }

    /// Create the aggregate, then append each sample in order, waiting
    /// `append_interval` before every append. Nothing is appended when the
    /// create fails.
    pub async fn aggregate_chain(
        &self,
        create: PlannedSubmission,
        appends: Vec<TelemetrySample>,
    ) -> Vec<SubmissionOutcome> {
        let unit = create.unit;
        let record_id = create.record_id.clone();

        let created = self.run(Job::create(create)).await;
        let proceed = created.succeeded();
        let mut outcomes = vec![created];
        if !proceed {
            return outcomes;
        }

        for (n, sample) in appends.iter().enumerate() {
            tokio::time::sleep(self.config.append_interval()).await;
            let job = Job {
                unit,
                partition: Partition::MainChain,
                record_id: record_id.clone(),
                kind: SubmissionKind::AppendTelemetry { seq: n + 1 },
                function: operations::APPEND_TELEMETRY,
                args: telemetry_args(&record_id, sample),
                delivery: Delivery::Blocking,
            };
            outcomes.push(self.run(job).await);
        }
        outcomes
    }
}
