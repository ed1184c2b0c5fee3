//! # Error Types
//!
//! Defines error types shared across subsystems.

use thiserror::Error;

/// Errors raised when selecting a partition from operator input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionParseError {
    /// Input is not a channel number.
    #[error("Unrecognized partition: {0}")]
    Unrecognized(String),

    /// Channel number outside 1..=6.
    #[error("Partition out of range: {0} (expected 1-6)")]
    OutOfRange(u8),
}
