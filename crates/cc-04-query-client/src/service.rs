//! # Query Client Service
//!
//! Pure reads against the partitions. Nothing is cached and nothing is
//! written; every call is one `evaluate_transaction`.

use std::sync::Arc;
use std::time::Instant;

use cc_02_ledger_gateway::LedgerGateway;
use serde::de::DeserializeOwned;
use shared_types::{operations, AggregateRecord, Partition};
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::QueryError;
use crate::domain::result::QueryResult;
use crate::domain::verification::{VerificationIssue, VerificationReport};

/// Read-only client over a ledger gateway.
#[derive(Clone)]
pub struct QueryClient {
    gateway: Arc<dyn LedgerGateway>,
}

impl QueryClient {
    pub fn new(gateway: Arc<dyn LedgerGateway>) -> Self {
        Self { gateway }
    }

    /// Every record on `partition`, as a JSON array.
    pub async fn list_all(&self, partition: Partition) -> Result<QueryResult, QueryError> {
        let raw = self
            .gateway
            .evaluate_transaction(partition, operations::READ_ALL, &[])
            .await?;
        let result = QueryResult::from_bytes(partition, raw)?;
        debug!("[cc-04] Listed {} records on {}", result.len(), partition);
        Ok(result)
    }

    /// Read one id.
    ///
    /// On the drill and refinery partitions `id` is matched against the
    /// embedded oil batch id and the result is an array of matches.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no record under `id`
    pub async fn get_by_id(&self, partition: Partition, id: &str) -> Result<QueryResult, QueryError> {
        let raw = self
            .gateway
            .evaluate_transaction(partition, operations::READ, &[id.to_string()])
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    QueryError::NotFound {
                        partition,
                        id: id.to_string(),
                    }
                } else {
                    QueryError::Gateway(err)
                }
            })?;
        QueryResult::from_bytes(partition, raw)
    }

    /// `list_all` decoded into the partition's record type.
    pub async fn list_records<R: DeserializeOwned>(
        &self,
        partition: Partition,
    ) -> Result<Vec<R>, QueryError> {
        self.list_all(partition).await?.records()
    }

    /// One main chain aggregate.
    pub async fn aggregate(&self, id: &str) -> Result<AggregateRecord, QueryError> {
        let result = self.get_by_id(Partition::MainChain, id).await?;
        let mut records = result.records::<AggregateRecord>()?;
        records.pop().ok_or_else(|| QueryError::NotFound {
            partition: Partition::MainChain,
            id: id.to_string(),
        })
    }

    /// Check every main chain aggregate for an id and a non-empty telemetry
    /// log.
    ///
    /// ## Errors
    ///
    /// A stored document that is not an aggregate fails the whole listing,
    /// so no report is produced for it.
    #[instrument(skip(self))]
    pub async fn verify_all(&self) -> Result<VerificationReport, QueryError> {
        let started = Instant::now();
        let records = self
            .list_records::<AggregateRecord>(Partition::MainChain)
            .await?;

        let mut report = VerificationReport::default();
        for record in records {
            report.checked += 1;
            if record.id.is_empty() {
                report.issues.push((record.id.clone(), VerificationIssue::MissingId));
            }
            if record.telemetry.is_empty() {
                report.issues.push((record.id.clone(), VerificationIssue::EmptyTelemetry));
            }
            report.samples += record.telemetry.len();
        }
        report.elapsed = started.elapsed();

        if report.is_clean() {
            info!(
                "[cc-04] Verified {} aggregates in {:.3}s",
                report.checked,
                report.elapsed.as_secs_f64()
            );
        } else {
            warn!(
                "[cc-04] {} of {} aggregates failed verification",
                report.failed(),
                report.checked
            );
        }
        Ok(report)
    }
}
