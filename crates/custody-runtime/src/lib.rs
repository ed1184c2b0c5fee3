//! # Crude-Chain Custody Runtime
//!
//! Library side of the operator binary, exposed for tests.
//!
//! ## Modular Structure
//!
//! - `config` - `RuntimeConfig` with environment overrides
//! - `logging` - tracing subscriber bootstrap
//! - `ingest` - the four stage source files
//! - `app` - orchestrator and query client over one gateway
//! - `menu` - interactive operator menu
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `CC_*` environment overrides)
//! 2. Install logging
//! 3. Start the in-memory ledger network with one contract per partition
//! 4. Run the menu until `q` or end of input

#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod menu;

pub use app::CustodyApp;
pub use config::{ConfigError, IngestConfig, LogConfig, RuntimeConfig};
pub use ingest::{load_batch, IngestError};
pub use menu::{Console, MenuAction, ReadMode};
