//! Update pass: one telemetry update per listed record.

use std::sync::Arc;
use std::time::Instant;

use cc_01_record_store::domain::telemetry_args;
use cc_01_record_store::telemetry_policy;
use serde_json::Value;
use shared_types::{operations, Partition, TelemetrySample};
use tracing::{info, instrument};

use super::task::{Delivery, Job};
use super::{SubmissionOrchestrator, TaskLabel};
use crate::domain::errors::BatchError;
use crate::domain::report::{BatchReport, SubmissionKind};

/// Ids of the documents in a `GetAllAssets` response.
fn listed_ids(partition: Partition, body: &[u8]) -> Result<Vec<String>, BatchError> {
    let malformed = |message: String| BatchError::MalformedListing { partition, message };
    let documents: Vec<Value> =
        serde_json::from_slice(body).map_err(|e| malformed(e.to_string()))?;
    documents
        .iter()
        .map(|doc| {
            doc.get("ID")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| malformed("document without ID".to_string()))
        })
        .collect()
}

impl SubmissionOrchestrator {
    /// List every record on `partitions` and submit one telemetry update per
    /// record, each through `submit_async` with its commit awaited. Stage
    /// records get their sample replaced, aggregates get it appended.
    #[instrument(skip(self, sample))]
    pub async fn update_all(
        &self,
        partitions: &[Partition],
        sample: &TelemetrySample,
    ) -> Result<BatchReport, BatchError> {
        let started = Instant::now();

        let mut jobs = Vec::new();
        for &partition in partitions {
            let body = self
                .gateway
                .evaluate_transaction(partition, operations::READ_ALL, &[])
                .await
                .map_err(|source| BatchError::Listing { partition, source })?;
            let function = telemetry_policy(partition).operation();
            for record_id in listed_ids(partition, &body)? {
                jobs.push(Job {
                    unit: jobs.len(),
                    partition,
                    args: telemetry_args(&record_id, sample),
                    record_id,
                    kind: SubmissionKind::UpdateTelemetry,
                    function,
                    delivery: Delivery::Watched,
                });
            }
        }
        info!(
            "[cc-03] Updating telemetry of {} records on {} partitions",
            jobs.len(),
            partitions.len()
        );

        let units = jobs.len();
        let context = self.context();
        let mut tasks = Vec::with_capacity(units);
        for job in jobs {
            let label = TaskLabel {
                unit: job.unit,
                partition: job.partition,
                record_id: job.record_id.clone(),
                kind: job.kind,
            };
            let context = Arc::clone(&context);
            let handle = tokio::spawn(async move { vec![context.run(job).await] });
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
            "[cc-03] Update pass finished in {:.3}s: {}",
            report.elapsed.as_secs_f64(),
            report.summary()
        );
        Ok(report)
    }
}
