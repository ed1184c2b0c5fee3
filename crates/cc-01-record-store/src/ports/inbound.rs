//! # Inbound Ports (Driving Ports)
//!
//! The entry point the ledger uses to execute a contract operation.

use shared_types::Partition;

use super::outbound::ChaincodeStub;
use crate::domain::errors::ContractError;

/// A deployed custody contract.
///
/// Operations are addressed by name with positional string arguments and
/// return the raw payload the caller receives (JSON for reads, `true` /
/// `false` for `AssetExists`, empty for plain writes).
pub trait Contract: Send + Sync {
    /// Partition the contract serves.
    fn partition(&self) -> Partition;

    /// Execute `function` against the transaction's world state view.
    ///
    /// ## Errors
    ///
    /// - `UnknownOperation`: `function` is not served by this contract
    /// - `InvalidArguments`: wrong positional arity
    /// - `AlreadyExists` / `NotFound` / `NoMatches`: per-record outcomes
    fn invoke(
        &self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError>;
}
