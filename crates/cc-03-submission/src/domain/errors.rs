//! # Domain Errors
//!
//! Per-submission failures are data carried in the batch report; only
//! problems that prevent a batch from starting are returned as errors.

use cc_02_ledger_gateway::GatewayError;
use shared_types::Partition;
use thiserror::Error;

/// Why a single submission did not commit.
#[derive(Debug, Clone, Error)]
pub enum SubmissionFailure {
    /// Rejected by the contract or the ledger network.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The task driving the submission panicked.
    #[error("submission task panicked: {0}")]
    TaskPanicked(String),

    /// The submission task was cancelled by the runtime.
    #[error("submission task was cancelled")]
    Cancelled,
}

impl SubmissionFailure {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::Gateway(err) if err.is_already_exists())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Gateway(err) if err.is_not_found())
    }
}

/// Batch-level errors.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A source sequence has no records to draw from.
    #[error("{0} source is empty")]
    EmptySource(&'static str),

    /// The aggregate id list is empty.
    #[error("no aggregate base ids configured")]
    NoAggregateIds,

    /// Listing a partition before an update pass failed.
    #[error("failed to list {partition}: {source}")]
    Listing {
        partition: Partition,
        #[source]
        source: GatewayError,
    },

    /// A listed document carried no usable id.
    #[error("malformed listing from {partition}: {message}")]
    MalformedListing { partition: Partition, message: String },
}
