//! # Outbound Ports (Driven Ports)
//!
//! World state access required by the contracts. The ledger hands one stub
//! to each transaction; writes are only visible once that transaction
//! commits.

use crate::domain::errors::ContractError;

/// Keyed world state view of a single transaction.
///
/// Production: `TxSimulator` in cc-02-ledger-gateway
/// Testing: `InMemoryStub` (adapters/memory_stub.rs)
pub trait ChaincodeStub {
    /// Read a key. Own uncommitted writes are visible.
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, ContractError>;

    /// Buffer a write.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), ContractError>;

    /// Buffer a delete.
    fn del_state(&mut self, key: &str) -> Result<(), ContractError>;

    /// Ordered scan over `[start, end)`.
    ///
    /// An empty bound is open, so `("", "")` returns the whole partition.
    fn get_state_by_range(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, ContractError>;
}
