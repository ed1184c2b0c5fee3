//! # Source Ingestion
//!
//! Reads the four stage source files into a `BatchInput`. Each file is a
//! JSON array of records in the ledger's own field naming.

use std::fs;
use std::path::{Path, PathBuf};

use cc_03_submission::BatchInput;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::config::IngestConfig;

/// Ingestion errors.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn load_records<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, IngestError> {
    let bytes = fs::read(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every source file named by `config`.
pub fn load_batch(config: &IngestConfig) -> Result<BatchInput, IngestError> {
    let input = BatchInput {
        drill: load_records(&config.drill_path())?,
        refinery: load_records(&config.refinery_path())?,
        storage: load_records(&config.storage_path())?,
        pump: load_records(&config.pump_path())?,
    };
    info!(
        "Loaded sources from {}: {} drill, {} refinery, {} storage, {} pump",
        config.data_dir.display(),
        input.drill.len(),
        input.refinery.len(),
        input.storage.len(),
        input.pump.len()
    );
    Ok(input)
}
