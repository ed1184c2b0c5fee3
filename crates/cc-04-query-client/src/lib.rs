//! # CC-04 Query Client
//!
//! Read-only view over the six partitions: list a partition, fetch by id,
//! decode into the record types and verify the main chain aggregates.
//!
//! **Subsystem ID:** 4
//!
//! Every call is a single `evaluate_transaction`; the client keeps no cache
//! and never submits.

#![warn(clippy::all)]

pub mod domain;
pub mod service;

// Re-exports
pub use domain::{QueryError, QueryResult, VerificationIssue, VerificationReport};
pub use service::QueryClient;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
