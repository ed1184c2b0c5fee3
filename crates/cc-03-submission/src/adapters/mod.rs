//! # Adapters Module
//!
//! Id suffix sources for the Submission Orchestrator.

pub mod ids;

pub use ids::{FixedIds, SequentialIds, SystemClockIds};
