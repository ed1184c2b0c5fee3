//! # Ports Layer
//!
//! Defines the port traits for the Ledger Gateway subsystem.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (the submit/evaluate API used by clients)
//! - `outbound.rs` - Driven ports (fault injection hook)

pub mod inbound;
pub mod outbound;

pub use inbound::{CommitWatcher, LedgerGateway, SubmissionHandle};
pub use outbound::{FaultInjector, NoFaults};
