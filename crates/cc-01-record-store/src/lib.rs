//! # CC-01 Record Store
//!
//! Per-partition custody contracts over a keyed world state.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Every partition runs the same contract shape over a different record
//! schema:
//! - `CreateAsset` fails with `AlreadyExists` when the key is live
//! - `ReadAsset`, `DeleteAsset` and telemetry updates fail with `NotFound`
//!   when the key is absent
//! - `GetAllAssets` is an open-ended range scan (empty partition = `[]`)
//! - stage records replace their single telemetry sample, the main chain
//!   record appends to its telemetry log
//!
//! ## Record Lifecycle
//!
//! ```text
//! absent ──CreateAsset──→ active ──ChangeIotData / UpdateIoTLogs──→ active
//!                            │
//!                            └──DeleteAsset──→ absent
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! cc-01-record-store/
//! ├── domain/     # ContractError, StageSchema, the five schemas, FieldSelector
//! ├── ports/      # ChaincodeStub (world state access), Contract (dispatch)
//! ├── adapters/   # InMemoryStub
//! └── service.rs  # RecordStore<S>, deploy()
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryStub;
pub use domain::{
    ArgCursor, ContractError, DrillToRefinerySchema, FieldSelector, Lookup, MainChainSchema,
    PumpToCustomerSchema, RefineryToStorageSchema, StageSchema, StorageToConsumerSchema,
    TelemetryPolicy,
};
pub use ports::{ChaincodeStub, Contract};
pub use service::{deploy, telemetry_policy, ReadResult, RecordStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
