//! # Inbound Ports (Driving Ports)
//!
//! The narrow network boundary every client goes through: submit a named
//! operation to a partition, or evaluate a read-only one.

use std::time::Duration;

use async_trait::async_trait;
use shared_types::Partition;
use tokio::sync::oneshot;

use crate::domain::commit::CommitStatus;
use crate::domain::errors::{GatewayError, Phase};

/// Ledger network client.
///
/// One instance is shared by every task of a batch; implementations must be
/// safe for concurrent use.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Endorse, order and wait for the commit of a state-changing operation.
    ///
    /// ## Errors
    ///
    /// - `Contract`: the contract rejected the call (e.g. `AlreadyExists`)
    /// - `Commit`: ordered but invalidated at commit
    /// - `Timeout` / `Unavailable` / `Injected`: network failures
    async fn submit_transaction(
        &self,
        partition: Partition,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, GatewayError>;

    /// Run a read-only operation against current world state.
    async fn evaluate_transaction(
        &self,
        partition: Partition,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, GatewayError>;

    /// Endorse and hand off to ordering without waiting for the commit.
    async fn submit_async(
        &self,
        partition: Partition,
        function: &str,
        args: &[String],
    ) -> Result<(SubmissionHandle, CommitWatcher), GatewayError>;
}

/// Endorsed and ordered submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionHandle {
    /// Ledger-assigned transaction id.
    pub transaction_id: String,
    /// Payload returned by the contract at endorsement.
    pub result: Vec<u8>,
}

/// Resolves once the ordered transaction has been validated and committed.
#[derive(Debug)]
pub struct CommitWatcher {
    partition: Partition,
    transaction_id: String,
    receiver: oneshot::Receiver<CommitStatus>,
    timeout: Duration,
}

impl CommitWatcher {
    pub fn new(
        partition: Partition,
        transaction_id: String,
        receiver: oneshot::Receiver<CommitStatus>,
        timeout: Duration,
    ) -> Self {
        Self {
            partition,
            transaction_id,
            receiver,
            timeout,
        }
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Wait for the commit status.
    ///
    /// An invalidated transaction is still a status, not an error; check
    /// `successful`.
    pub async fn status(self) -> Result<CommitStatus, GatewayError> {
        match tokio::time::timeout(self.timeout, self.receiver).await {
            Ok(Ok(status)) => Ok(status),
            Ok(Err(_)) => Err(GatewayError::Unavailable(format!(
                "commit status for {} was dropped",
                self.transaction_id
            ))),
            Err(_) => Err(GatewayError::Timeout {
                partition: self.partition,
                phase: Phase::CommitStatus,
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}
