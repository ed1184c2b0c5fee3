//! # Ports Layer
//!
//! Defines the port traits for the Submission Orchestrator subsystem.
//!
//! - `outbound.rs` - Driven ports (id suffix source)
//!
//! The orchestrator also drives the `LedgerGateway` port owned by
//! cc-02-ledger-gateway.

pub mod outbound;

pub use outbound::IdGenerator;
