//! # Domain Module
//!
//! Core domain types for the Ledger Gateway subsystem.

pub mod commit;
pub mod config;
pub mod errors;
pub mod world_state;

pub use commit::*;
pub use config::*;
pub use errors::*;
pub use world_state::*;
