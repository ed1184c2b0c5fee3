//! # Runtime Configuration
//!
//! Unified configuration for every subsystem the runtime wires together.
//! Defaults come from each subsystem's own config type; a handful of values
//! can be overridden from the environment.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `CC_DATA_DIR` | `ingest.data_dir` |
//! | `CC_BATCH_SIZE` | `orchestrator.batch_size` |
//! | `CC_MAX_IN_FLIGHT` | `orchestrator.max_in_flight` |
//! | `CC_AGGREGATE_APPENDS` | `orchestrator.aggregate_appends` |
//! | `CC_APPEND_INTERVAL_MS` | `orchestrator.append_interval_ms` |
//! | `CC_LOG_LEVEL` | `log.level` |
//! | `CC_JSON_LOGS` | `log.json` |

use std::path::PathBuf;
use std::str::FromStr;

use cc_02_ledger_gateway::GatewayConfig;
use cc_03_submission::{AggregateDefaults, OrchestratorConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub gateway: GatewayConfig,
    pub orchestrator: OrchestratorConfig,
    pub defaults: AggregateDefaults,
    pub ingest: IngestConfig,
    pub log: LogConfig,
}

/// Location of the four stage source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub data_dir: PathBuf,
    pub drill_file: String,
    pub refinery_file: String,
    pub storage_file: String,
    pub pump_file: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            drill_file: "DrillToRefin.json".to_string(),
            refinery_file: "RefinToStor.json".to_string(),
            storage_file: "StorToConsu.json".to_string(),
            pump_file: "PumpToCust.json".to_string(),
        }
    }
}

impl IngestConfig {
    pub fn drill_path(&self) -> PathBuf {
        self.data_dir.join(&self.drill_file)
    }

    pub fn refinery_path(&self) -> PathBuf {
        self.data_dir.join(&self.refinery_file)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage_file)
    }

    pub fn pump_path(&self) -> PathBuf {
        self.data_dir.join(&self.pump_file)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// JSON lines instead of human readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An override could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

impl RuntimeConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("CC_DATA_DIR") {
            config.ingest.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("CC_LOG_LEVEL") {
            config.log.level = level;
        }
        if let Some(json) = lookup("CC_JSON_LOGS") {
            config.log.json = parse_flag("CC_JSON_LOGS", &json)?;
        }

        let orchestrator = &mut config.orchestrator;
        override_with(&lookup, "CC_BATCH_SIZE", &mut orchestrator.batch_size)?;
        override_with(&lookup, "CC_MAX_IN_FLIGHT", &mut orchestrator.max_in_flight)?;
        override_with(
            &lookup,
            "CC_AGGREGATE_APPENDS",
            &mut orchestrator.aggregate_appends,
        )?;
        override_with(
            &lookup,
            "CC_APPEND_INTERVAL_MS",
            &mut orchestrator.append_interval_ms,
        )?;

        Ok(config)
    }
}

fn override_with<F, T>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
        })?;
    }
    Ok(())
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.orchestrator.batch_size, 10);
        assert_eq!(config.ingest.drill_path(), PathBuf::from("./DrillToRefin.json"));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("CC_DATA_DIR", "/srv/custody"),
            ("CC_BATCH_SIZE", "4"),
            ("CC_MAX_IN_FLIGHT", "2"),
            ("CC_AGGREGATE_APPENDS", "0"),
            ("CC_APPEND_INTERVAL_MS", "25"),
            ("CC_JSON_LOGS", "true"),
        ]))
        .unwrap();

        assert_eq!(
            config.ingest.pump_path(),
            PathBuf::from("/srv/custody/PumpToCust.json")
        );
        assert_eq!(config.orchestrator.batch_size, 4);
        assert_eq!(config.orchestrator.max_in_flight, 2);
        assert_eq!(config.orchestrator.aggregate_appends, 0);
        assert_eq!(config.orchestrator.append_interval_ms, 25);
        assert!(config.log.json);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let err = RuntimeConfig::from_lookup(lookup(&[("CC_BATCH_SIZE", "ten")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "CC_BATCH_SIZE",
                value: "ten".to_string()
            }
        );
        assert!(RuntimeConfig::from_lookup(lookup(&[("CC_JSON_LOGS", "maybe")])).is_err());
    }
}
