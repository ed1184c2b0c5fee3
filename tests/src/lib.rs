//! # Crude-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/          # Cross-subsystem scenarios
//!     ├── fixtures.rs       # Source records and ledger setup
//!     ├── custody_flow.rs   # Batch → ledger → query client
//!     └── concurrency.rs    # Failure isolation and same-id races
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cc-tests
//! cargo test -p cc-tests integration::concurrency
//! ```

pub mod integration;
