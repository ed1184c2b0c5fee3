//! # Gateway Configuration
//!
//! Connection timeouts for each phase of a transaction, plus optional
//! simulated network latency for the in-memory ledger.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Gateway timeouts, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Read-only evaluation.
    pub evaluate_timeout_ms: u64,
    /// Endorsement (contract simulation).
    pub endorse_timeout_ms: u64,
    /// Hand-off to ordering.
    pub submit_timeout_ms: u64,
    /// Waiting for the commit status.
    pub commit_status_timeout_ms: u64,
    /// Delay added to every network round trip. Zero disables it.
    pub simulated_latency_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            evaluate_timeout_ms: 5_000,
            endorse_timeout_ms: 15_000,
            submit_timeout_ms: 5_000,
            commit_status_timeout_ms: 60_000,
            simulated_latency_ms: 0,
        }
    }
}

impl GatewayConfig {
    pub fn evaluate_timeout(&self) -> Duration {
        Duration::from_millis(self.evaluate_timeout_ms)
    }

    pub fn endorse_timeout(&self) -> Duration {
        Duration::from_millis(self.endorse_timeout_ms)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    pub fn commit_status_timeout(&self) -> Duration {
        Duration::from_millis(self.commit_status_timeout_ms)
    }

    pub fn simulated_latency(&self) -> Option<Duration> {
        (self.simulated_latency_ms > 0).then(|| Duration::from_millis(self.simulated_latency_ms))
    }
}
