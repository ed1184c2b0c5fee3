//! # Shared Types Crate
//!
//! This crate contains the custody data model shared by every Crude-Chain
//! subsystem: the record shapes stored on each partition, the main chain
//! aggregate and the partition catalogue.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: record shapes are defined once here and
//!   reused by the contracts, the submission pipeline and the query client.
//! - **Wire Compatibility**: serialized field names match the documents
//!   already written by the stage contracts (`Bill_Number`, `Oil_Batch_ID`,
//!   `Iot_Data`, ...).
//! - **One Owner**: every record lives on exactly one partition.

pub mod entities;
pub mod errors;
pub mod operations;
pub mod partition;

pub use entities::*;
pub use errors::*;
pub use partition::Partition;
