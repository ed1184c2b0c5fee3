//! # Domain Module
//!
//! Core domain types for the Submission Orchestrator subsystem.

pub mod batch;
pub mod config;
pub mod errors;
pub mod report;

pub use batch::*;
pub use config::*;
pub use errors::*;
pub use report::*;
