//! Crude-Chain operator entry point.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use cc_02_ledger_gateway::InMemoryLedger;
use cc_03_submission::SystemClockIds;
use custody_runtime::{logging, Console, CustodyApp, RuntimeConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("loading configuration")?;
    logging::init(&config.log)?;

    info!("===========================================");
    info!("  Crude-Chain Custody Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("  Data directory: {}", config.ingest.data_dir.display());
    info!("===========================================");

    let ledger = InMemoryLedger::new(config.gateway.clone());
    let app = CustodyApp::new(config, Arc::new(ledger), Arc::new(SystemClockIds));

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    console.run(&app).await?;

    info!("Shutdown complete");
    Ok(())
}
