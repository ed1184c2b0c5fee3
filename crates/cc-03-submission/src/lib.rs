//! # CC-03 Submission Orchestrator
//!
//! Turns source records into a batch of per-stage creates plus one aggregate
//! per unit on the main chain, and drives them through the ledger gateway
//! concurrently.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Fan-out per unit
//!
//! ```text
//! unit j ──┬── CreateAsset  channel1  (drill)
//!          ├── CreateAsset  channel2  (refinery)
//!          ├── CreateAsset  channel3 | channel4  (storage, by parity of j)
//!          ├── CreateAsset  channel5  (pump → customer)
//!          └── CreateAsset  channel6  (aggregate)
//!                 └── UpdateIoTLogs × N, sequential, spaced by the append interval
//! ```
//!
//! Every submission is owned by exactly one task. Tasks are bounded by a
//! semaphore and joined before the report is built; a panicking task shows
//! up as a failed outcome, never as a lost one.

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{FixedIds, SequentialIds, SystemClockIds};
pub use domain::{
    build_aggregate, derive_id, AggregateDefaults, BatchError, BatchInput, BatchReport,
    OrchestratorConfig, PlannedSubmission, SubmissionFailure, SubmissionKind, SubmissionOutcome,
    UnitPlan,
};
pub use ports::IdGenerator;
pub use service::{Progress, ProgressSnapshot, SubmissionOrchestrator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
