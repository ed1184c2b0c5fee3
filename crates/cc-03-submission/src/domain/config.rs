//! # Orchestrator Configuration
//!
//! Batch sizing, concurrency and retry limits, plus the fixed texts stamped
//! into every aggregate record.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Submission pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Units of work per batch.
    pub batch_size: usize,
    /// Submissions allowed in flight at once.
    pub max_in_flight: usize,
    /// Telemetry appends issued after each aggregate is created.
    pub aggregate_appends: usize,
    /// Delay between consecutive appends to the same aggregate.
    pub append_interval_ms: u64,
    /// Re-submissions of a transient failure. Zero disables retries.
    pub max_retries: u32,
    /// Delay before a re-submission.
    pub retry_backoff_ms: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_in_flight: 64,
            aggregate_appends: 3,
            append_interval_ms: 500,
            max_retries: 0,
            retry_backoff_ms: 200,
        }
    }
}

impl OrchestratorConfig {
    pub fn append_interval(&self) -> Duration {
        Duration::from_millis(self.append_interval_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Semaphore size; never zero.
    pub fn permits(&self) -> usize {
        self.max_in_flight.max(1)
    }
}

/// Constant texts of the aggregate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateDefaults {
    /// Base ids cycled by source index.
    pub base_ids: Vec<String>,
    pub refinery_status: String,
    pub storage_status: String,
    pub consumer_status: String,
    pub compliance_report: String,
    pub total_payment: String,
    pub elapsed_time: String,
}

impl Default for AggregateDefaults {
    fn default() -> Self {
        Self {
            base_ids: (1..=10).map(|n| format!("M{n:03}")).collect(),
            refinery_status: "High in Demand".to_string(),
            storage_status: "Perfect Down to the bottom".to_string(),
            consumer_status: "Facility is perfect".to_string(),
            compliance_report: "Perfect down to the very last bottom perfect".to_string(),
            total_payment: "$ 110,000".to_string(),
            elapsed_time: "72 hour".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_ids() {
        let defaults = AggregateDefaults::default();
        assert_eq!(defaults.base_ids.len(), 10);
        assert_eq!(defaults.base_ids[0], "M001");
        assert_eq!(defaults.base_ids[9], "M010");
    }

    #[test]
    fn test_zero_in_flight_still_admits_one() {
        let config = OrchestratorConfig {
            max_in_flight: 0,
            ..Default::default()
        };
        assert_eq!(config.permits(), 1);
    }
}
