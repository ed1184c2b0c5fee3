//! # Adapters Module
//!
//! Contains adapter implementations for the Record Store subsystem.
//!
//! ## Modules
//!
//! - `memory_stub`: standalone world state for exercising a contract directly

pub mod memory_stub;

pub use memory_stub::InMemoryStub;
