//! # Domain Module
//!
//! Result and error types of the Query Client.

pub mod errors;
pub mod result;
pub mod verification;

pub use errors::*;
pub use result::*;
pub use verification::*;
