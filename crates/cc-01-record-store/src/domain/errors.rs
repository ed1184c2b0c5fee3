//! # Domain Errors
//!
//! Error types returned by the custody contracts.

use thiserror::Error;

/// Contract-level error types.
///
/// `AlreadyExists`, `NotFound` and `NoMatches` are expected outcomes that
/// callers handle per record; the remaining variants indicate bad input or a
/// broken world state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// Create on a live key.
    #[error("the asset {id} already exists")]
    AlreadyExists {
        /// Record key
        id: String,
    },

    /// Read, delete or telemetry update on an absent key.
    #[error("the asset {id} does not exist")]
    NotFound {
        /// Record key
        id: String,
    },

    /// Field-selector query matched nothing.
    #[error("no assets found for {field}: {value}")]
    NoMatches {
        /// Embedded field the selector filters on
        field: String,
        /// Value searched for
        value: String,
    },

    /// Stored document could not be decoded.
    #[error("malformed document at key {key}: {message}")]
    Serialization {
        /// Record key
        key: String,
        /// Decoder message
        message: String,
    },

    /// Wrong number of positional arguments.
    #[error("{operation} expects {expected} arguments, got {got}")]
    InvalidArguments {
        /// Operation name
        operation: String,
        /// Required argument count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Operation name not served by this contract.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// World state access failed.
    #[error("failed to access world state: {0}")]
    State(String),
}

impl ContractError {
    /// True for every "record is not there" outcome, including an empty
    /// selector result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoMatches { .. })
    }

    /// True when a create collided with a live key.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}
