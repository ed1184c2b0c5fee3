//! # Adapters Module
//!
//! Contains adapter implementations for the Ledger Gateway subsystem.
//!
//! ## Modules
//!
//! - `in_memory_ledger`: single-process ledger network hosting all six partitions
//! - `scripted_faults`: fault injector driven by (partition, key) rules

pub mod in_memory_ledger;
pub mod scripted_faults;

pub use in_memory_ledger::InMemoryLedger;
pub use scripted_faults::ScriptedFaults;
