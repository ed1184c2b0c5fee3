//! # Domain Errors

use cc_02_ledger_gateway::GatewayError;
use shared_types::Partition;
use thiserror::Error;

/// Query Client error types.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// No record under the id (or no selector match).
    #[error("no record {id} on {partition}")]
    NotFound {
        /// Partition queried
        partition: Partition,
        /// Id or embedded value searched for
        id: String,
    },

    /// The ledger returned bytes that are not the expected JSON.
    #[error("undecodable response from {partition}: {message}")]
    Decode {
        /// Partition queried
        partition: Partition,
        /// Decoder message
        message: String,
    },

    /// Evaluation failed at the gateway.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl QueryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = QueryError::NotFound {
            partition: Partition::MainChain,
            id: "M0010".into(),
        };
        assert_eq!(err.to_string(), "no record M0010 on channel6");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_gateway_error_is_transparent() {
        let err: QueryError = GatewayError::Unavailable("peer down".into()).into();
        assert_eq!(err.to_string(), "ledger unavailable: peer down");
        assert!(!err.is_not_found());
    }
}
