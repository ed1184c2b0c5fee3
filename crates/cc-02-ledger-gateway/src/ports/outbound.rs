//! # Outbound Ports (Driven Ports)
//!
//! Hook consulted before every endorsement, used to force failures for
//! chosen records.

use shared_types::Partition;

/// Decides whether a call should fail before it reaches the contract.
pub trait FaultInjector: Send + Sync {
    /// True to fail the call. `args[0]` is the record key for every
    /// key-addressed operation.
    fn should_fail(&self, partition: Partition, function: &str, args: &[String]) -> bool;
}

/// Never injects anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

impl FaultInjector for NoFaults {
    fn should_fail(&self, _partition: Partition, _function: &str, _args: &[String]) -> bool {
        false
    }
}
