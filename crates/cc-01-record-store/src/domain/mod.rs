//! # Domain Module
//!
//! Core domain types for the Record Store subsystem.

pub mod errors;
pub mod schema;
pub mod selector;
pub mod stages;

pub use errors::*;
pub use schema::*;
pub use selector::*;
pub use stages::*;
