//! # CC-02 Ledger Gateway
//!
//! The network boundary between clients and the partitioned ledger.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Clients see two narrow operations per partition:
//! - `submit_transaction`: endorse, order and wait for commit
//! - `evaluate_transaction`: read-only simulation against current state
//!
//! plus `submit_async`, which returns as soon as the transaction is handed to
//! ordering together with a `CommitWatcher` resolving to the commit status.
//!
//! ## Transaction Flow
//!
//! ```text
//! client ──submit──→ endorse (contract on TxSimulator) ──→ read/write set
//!                                                              │
//!        ←─SubmissionHandle + CommitWatcher── order ←──────────┘
//!                                               │
//!                              validate (MVCC) + apply ──→ CommitStatus
//! ```
//!
//! ## Timeouts
//!
//! | Phase | Default |
//! |-------|---------|
//! | evaluate | 5 s |
//! | endorse | 15 s |
//! | submit | 5 s |
//! | commit status | 60 s |
//!
//! A timeout is reported as an ordinary `GatewayError`.

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{InMemoryLedger, ScriptedFaults};
pub use domain::{
    CommitStatus, GatewayConfig, GatewayError, PartitionState, Phase, ReadWriteSet,
    TxSimulator, TxValidationCode,
};
pub use ports::{CommitWatcher, FaultInjector, LedgerGateway, NoFaults, SubmissionHandle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
