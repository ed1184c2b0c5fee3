//! In-memory ledger network.
//!
//! Hosts one contract per partition over a versioned world state. A
//! submission is endorsed (simulated against a read view), handed to
//! ordering, then validated and committed on a background task that
//! resolves the caller's `CommitWatcher`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cc_01_record_store::{deploy, Contract};
use parking_lot::RwLock;
use shared_types::Partition;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::commit::CommitStatus;
use crate::domain::config::GatewayConfig;
use crate::domain::errors::{GatewayError, Phase};
use crate::domain::world_state::{PartitionState, ReadWriteSet, TxSimulator};
use crate::ports::inbound::{CommitWatcher, LedgerGateway, SubmissionHandle};
use crate::ports::outbound::{FaultInjector, NoFaults};

/// One partition: its contract and committed state.
struct PartitionLedger {
    partition: Partition,
    contract: Arc<dyn Contract>,
    state: RwLock<PartitionState>,
}

impl PartitionLedger {
    fn new(partition: Partition) -> Self {
        Self {
            partition,
            contract: deploy(partition),
            state: RwLock::new(PartitionState::new()),
        }
    }

    fn simulate(
        &self,
        function: &str,
        args: &[String],
    ) -> Result<(Vec<u8>, ReadWriteSet), GatewayError> {
        let state = self.state.read();
        let mut simulator = TxSimulator::new(&state);
        let result = self
            .contract
            .invoke(&mut simulator, function, args)
            .map_err(|source| GatewayError::Contract {
                partition: self.partition,
                source,
            })?;
        Ok((result, simulator.into_rwset()))
    }

    fn commit(&self, transaction_id: String, rwset: &ReadWriteSet) -> CommitStatus {
        let (block, code) = self.state.write().commit(rwset);
        if code.is_valid() {
            debug!(
                "[cc-02] Committed {} in block {} on {}",
                transaction_id, block, self.partition
            );
        } else {
            warn!(
                "[cc-02] Transaction {} invalidated in block {} on {}: {}",
                transaction_id, block, self.partition, code
            );
        }
        CommitStatus::new(transaction_id, code, block)
    }
}

struct LedgerInner {
    config: GatewayConfig,
    partitions: HashMap<Partition, Arc<PartitionLedger>>,
    faults: Arc<dyn FaultInjector>,
}

impl LedgerInner {
    async fn latency(&self) {
        if let Some(delay) = self.config.simulated_latency() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Single-process ledger network serving all six partitions.
///
/// Cheap to clone; clones share the same world state.
#[derive(Clone)]
pub struct InMemoryLedger {
    inner: Arc<LedgerInner>,
}

impl InMemoryLedger {
    /// Network with every partition deployed and no injected faults.
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_faults(config, Arc::new(NoFaults))
    }

    /// Network consulting `faults` before every call.
    pub fn with_faults(config: GatewayConfig, faults: Arc<dyn FaultInjector>) -> Self {
        let partitions = Partition::ALL
            .into_iter()
            .map(|p| (p, Arc::new(PartitionLedger::new(p))))
            .collect();
        Self {
            inner: Arc::new(LedgerInner {
                config,
                partitions,
                faults,
            }),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Committed record count on a partition.
    pub fn record_count(&self, partition: Partition) -> usize {
        self.inner
            .partitions
            .get(&partition)
            .map_or(0, |ledger| ledger.state.read().len())
    }

    /// Committed block height of a partition.
    pub fn height(&self, partition: Partition) -> u64 {
        self.inner
            .partitions
            .get(&partition)
            .map_or(0, |ledger| ledger.state.read().height())
    }

    fn ledger(&self, partition: Partition) -> Result<&Arc<PartitionLedger>, GatewayError> {
        self.inner
            .partitions
            .get(&partition)
            .ok_or(GatewayError::UnknownPartition(partition))
    }

    fn check_faults(
        &self,
        partition: Partition,
        function: &str,
        args: &[String],
    ) -> Result<(), GatewayError> {
        if self.inner.faults.should_fail(partition, function, args) {
            return Err(GatewayError::Injected {
                partition,
                key: args.first().cloned().unwrap_or_default(),
            });
        }
        Ok(())
    }

    fn timeout_error(partition: Partition, phase: Phase, limit: std::time::Duration) -> GatewayError {
        GatewayError::Timeout {
            partition,
            phase,
            timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn submit_transaction(
        &self,
        partition: Partition,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, GatewayError> {
        let (handle, watcher) = self.submit_async(partition, function, args).await?;
        let status = watcher.status().await?;
        if !status.successful {
            return Err(GatewayError::Commit {
                transaction_id: status.transaction_id,
                code: status.code,
            });
        }
        Ok(handle.result)
    }

    async fn evaluate_transaction(
        &self,
        partition: Partition,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, GatewayError> {
        self.check_faults(partition, function, args)?;
        let ledger = self.ledger(partition)?;
        let limit = self.inner.config.evaluate_timeout();

        let evaluation = async {
            self.inner.latency().await;
            ledger.simulate(function, args)
        };
        let (result, _) = tokio::time::timeout(limit, evaluation)
            .await
            .map_err(|_| Self::timeout_error(partition, Phase::Evaluate, limit))??;
        debug!("[cc-02] Evaluated {} on {}", function, partition);
        Ok(result)
    }

    async fn submit_async(
        &self,
        partition: Partition,
        function: &str,
        args: &[String],
    ) -> Result<(SubmissionHandle, CommitWatcher), GatewayError> {
        self.check_faults(partition, function, args)?;
        let ledger = Arc::clone(self.ledger(partition)?);
        let config = &self.inner.config;

        let endorse_limit = config.endorse_timeout();
        let endorsement = async {
            self.inner.latency().await;
            ledger.simulate(function, args)
        };
        let (result, rwset) = tokio::time::timeout(endorse_limit, endorsement)
            .await
            .map_err(|_| Self::timeout_error(partition, Phase::Endorse, endorse_limit))??;

        let submit_limit = config.submit_timeout();
        tokio::time::timeout(submit_limit, self.inner.latency())
            .await
            .map_err(|_| Self::timeout_error(partition, Phase::Submit, submit_limit))?;

        let transaction_id = Uuid::new_v4().to_string();
        debug!(
            "[cc-02] Submitted {} {} on {} ({} writes)",
            transaction_id,
            function,
            partition,
            rwset.writes.len()
        );

        let (sender, receiver) = oneshot::channel();
        let inner = Arc::clone(&self.inner);
        let committed_id = transaction_id.clone();
        tokio::spawn(async move {
            inner.latency().await;
            let status = ledger.commit(committed_id, &rwset);
            // The watcher may have been dropped; the commit stands regardless.
            let _ = sender.send(status);
        });

        let watcher = CommitWatcher::new(
            partition,
            transaction_id.clone(),
            receiver,
            config.commit_status_timeout(),
        );
        Ok((
            SubmissionHandle {
                transaction_id,
                result,
            },
            watcher,
        ))
    }
}
