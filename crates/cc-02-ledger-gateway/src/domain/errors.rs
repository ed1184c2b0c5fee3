//! # Domain Errors
//!
//! Failures surfaced across the ledger network boundary.

use cc_01_record_store::ContractError;
use shared_types::Partition;
use thiserror::Error;

use super::commit::TxValidationCode;

/// Transaction phase an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Evaluate,
    Endorse,
    Submit,
    CommitStatus,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Evaluate => "evaluate",
            Phase::Endorse => "endorse",
            Phase::Submit => "submit",
            Phase::CommitStatus => "commit status",
        };
        f.write_str(name)
    }
}

/// Gateway error types.
///
/// Errors from `evaluate_transaction` are evaluation errors, every other
/// entry point raises submission errors.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The contract rejected the invocation.
    #[error("{partition}: {source}")]
    Contract {
        /// Partition the contract runs on
        partition: Partition,
        /// Contract outcome
        #[source]
        source: ContractError,
    },

    /// A phase exceeded its configured timeout.
    #[error("{phase} on {partition} timed out after {timeout_ms}ms")]
    Timeout {
        /// Partition addressed
        partition: Partition,
        /// Phase that timed out
        phase: Phase,
        /// Configured limit
        timeout_ms: u64,
    },

    /// Transaction was ordered but failed validation.
    #[error("transaction {transaction_id} failed to commit with status {code}")]
    Commit {
        /// Ledger-assigned id
        transaction_id: String,
        /// Validation code
        code: TxValidationCode,
    },

    /// No contract is deployed on the partition.
    #[error("no contract deployed on {0}")]
    UnknownPartition(Partition),

    /// Connection-level failure.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// Failure forced by a fault injector.
    #[error("injected fault on {partition} for {key}")]
    Injected {
        /// Partition addressed
        partition: Partition,
        /// Record key the fault is bound to
        key: String,
    },
}

impl GatewayError {
    /// Contract outcome carried by this error, if any.
    pub fn contract_error(&self) -> Option<&ContractError> {
        match self {
            GatewayError::Contract { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.contract_error().is_some_and(ContractError::is_not_found)
    }

    pub fn is_already_exists(&self) -> bool {
        self.contract_error()
            .is_some_and(ContractError::is_already_exists)
    }

    /// Network-level failures worth re-submitting. Contract outcomes never are.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::Timeout { .. }
                | GatewayError::Commit { .. }
                | GatewayError::Unavailable(_)
                | GatewayError::Injected { .. }
        )
    }

    /// Transient failures known to have written nothing, so a re-submission
    /// cannot apply the same change twice. A timeout after hand-off to
    /// ordering is ambiguous: the transaction may still commit.
    pub fn is_retry_safe(&self) -> bool {
        match self {
            GatewayError::Injected { .. } | GatewayError::Commit { .. } => true,
            GatewayError::Timeout { phase, .. } => {
                matches!(phase, Phase::Evaluate | Phase::Endorse)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_errors_are_not_transient() {
        let err = GatewayError::Contract {
            partition: Partition::MainChain,
            source: ContractError::AlreadyExists {
                id: "M0010".into(),
            },
        };
        assert!(err.is_already_exists());
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "channel6: the asset M0010 already exists");
    }

    #[test]
    fn test_timeout_message() {
        let err = GatewayError::Timeout {
            partition: Partition::DrillToRefinery,
            phase: Phase::Evaluate,
            timeout_ms: 5_000,
        };
        assert!(err.is_transient());
        assert_eq!(err.to_string(), "evaluate on channel1 timed out after 5000ms");
    }

    #[test]
    fn test_only_pre_ordering_failures_are_retry_safe() {
        let timeout = |phase| GatewayError::Timeout {
            partition: Partition::MainChain,
            phase,
            timeout_ms: 10,
        };
        assert!(timeout(Phase::Endorse).is_retry_safe());
        assert!(timeout(Phase::Evaluate).is_retry_safe());
        assert!(!timeout(Phase::Submit).is_retry_safe());
        assert!(!timeout(Phase::CommitStatus).is_retry_safe());
        assert!(timeout(Phase::CommitStatus).is_transient());

        assert!(GatewayError::Injected {
            partition: Partition::MainChain,
            key: "M0010".into(),
        }
        .is_retry_safe());
        assert!(GatewayError::Commit {
            transaction_id: "abc".into(),
            code: TxValidationCode::MvccReadConflict,
        }
        .is_retry_safe());
        assert!(!GatewayError::Unavailable("peer down".into()).is_retry_safe());
    }

    #[test]
    fn test_commit_failure_message() {
        let err = GatewayError::Commit {
            transaction_id: "abc".into(),
            code: TxValidationCode::MvccReadConflict,
        };
        assert_eq!(
            err.to_string(),
            "transaction abc failed to commit with status MVCC_READ_CONFLICT"
        );
    }
}
