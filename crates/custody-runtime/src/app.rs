//! # Custody Application
//!
//! Wires the orchestrator and query client onto one ledger gateway and
//! exposes the operator actions.

use std::sync::Arc;

use anyhow::{Context, Result};
use cc_02_ledger_gateway::LedgerGateway;
use cc_03_submission::{BatchReport, IdGenerator, SubmissionOrchestrator};
use cc_04_query_client::{QueryClient, VerificationReport};
use shared_types::Partition;
use tracing::info;

use crate::config::RuntimeConfig;
use crate::ingest::load_batch;

/// Operator-facing application.
pub struct CustodyApp {
    config: RuntimeConfig,
    orchestrator: SubmissionOrchestrator,
    queries: QueryClient,
}

impl CustodyApp {
    pub fn new(
        config: RuntimeConfig,
        gateway: Arc<dyn LedgerGateway>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let orchestrator = SubmissionOrchestrator::new(
            Arc::clone(&gateway),
            ids,
            config.orchestrator.clone(),
            config.defaults.clone(),
        );
        Self {
            config,
            orchestrator,
            queries: QueryClient::new(gateway),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &SubmissionOrchestrator {
        &self.orchestrator
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    /// Load the source files and submit one batch of `batch_size` units.
    pub async fn create_batch(&self) -> Result<BatchReport> {
        let input = load_batch(&self.config.ingest).context("loading batch sources")?;
        let units = self.config.orchestrator.batch_size;
        let report = self
            .orchestrator
            .submit_batch(&input, units)
            .await
            .context("planning batch")?;
        info!("Batch complete: {}", report.summary());
        Ok(report)
    }

    /// Push the latest pump reading onto every stage record.
    pub async fn update_all(&self) -> Result<BatchReport> {
        let input = load_batch(&self.config.ingest).context("loading batch sources")?;
        let sample = input
            .pump
            .last()
            .map(|record| record.telemetry.clone())
            .context("pump source holds no records")?;
        let report = self
            .orchestrator
            .update_all(&Partition::STAGES, &sample)
            .await
            .context("listing records for update")?;
        info!("Update complete: {}", report.summary());
        Ok(report)
    }

    pub async fn verify_all(&self) -> Result<VerificationReport> {
        self.queries
            .verify_all()
            .await
            .context("verifying main chain")
    }
}
