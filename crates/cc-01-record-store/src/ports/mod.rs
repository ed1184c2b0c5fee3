//! # Ports Layer
//!
//! Defines the port traits for the Record Store subsystem.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (contract dispatch used by the ledger)
//! - `outbound.rs` - Driven ports (world state access required by the contracts)

pub mod inbound;
pub mod outbound;

pub use inbound::Contract;
pub use outbound::ChaincodeStub;
