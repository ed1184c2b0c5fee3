//! Id suffix generators.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::ports::outbound::IdGenerator;

/// Unix seconds of the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClockIds;

impl IdGenerator for SystemClockIds {
    fn next_suffix(&self) -> String {
        Utc::now().timestamp().to_string()
    }
}

/// Monotonic counter, for deterministic runs.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_suffix(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Always the same suffix. Two batches with the same unit count collide.
#[derive(Debug, Clone, Default)]
pub struct FixedIds(pub String);

impl IdGenerator for FixedIds {
    fn next_suffix(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_advance() {
        let ids = SequentialIds::starting_at(7);
        assert_eq!(ids.next_suffix(), "7");
        assert_eq!(ids.next_suffix(), "8");
    }

    #[test]
    fn test_clock_ids_are_numeric() {
        let suffix = SystemClockIds.next_suffix();
        assert!(suffix.parse::<i64>().unwrap() > 1_600_000_000);
    }
}
