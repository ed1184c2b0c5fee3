//! # Commit Outcomes
//!
//! Validation codes assigned by the committing peer and the status record a
//! commit watcher resolves to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of commit-time validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxValidationCode {
    /// Writes applied.
    Valid,
    /// A key read during endorsement changed before commit; writes discarded.
    MvccReadConflict,
    /// A range scanned during endorsement changed before commit.
    PhantomReadConflict,
}

impl TxValidationCode {
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for TxValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Valid => "VALID",
            Self::MvccReadConflict => "MVCC_READ_CONFLICT",
            Self::PhantomReadConflict => "PHANTOM_READ_CONFLICT",
        };
        f.write_str(name)
    }
}

/// What `CommitWatcher::status()` yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatus {
    /// Ledger-assigned transaction id.
    pub transaction_id: String,
    /// Validation code.
    pub code: TxValidationCode,
    /// Partition-local block number the transaction was ordered into.
    pub block_number: u64,
    /// `code == Valid`.
    pub successful: bool,
}

impl CommitStatus {
    pub fn new(transaction_id: String, code: TxValidationCode, block_number: u64) -> Self {
        Self {
            transaction_id,
            code,
            block_number,
            successful: code.is_valid(),
        }
    }
}
