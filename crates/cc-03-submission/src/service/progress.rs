//! Atomic progress counters shared by every task of a batch.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Cumulative counters. Tasks only ever increment them.
#[derive(Debug, Default)]
pub struct Progress {
    spawned: AtomicUsize,
    joined: AtomicUsize,
    committed: AtomicUsize,
    failed: AtomicUsize,
}

/// Point-in-time copy of `Progress`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Tasks spawned.
    pub spawned: usize,
    /// Tasks that reached the join barrier.
    pub joined: usize,
    /// Submissions that committed.
    pub committed: usize,
    /// Submissions that ended in failure.
    pub failed: usize,
}

impl ProgressSnapshot {
    /// Tasks spawned but not yet joined.
    pub fn outstanding(&self) -> usize {
        self.spawned.saturating_sub(self.joined)
    }
}

impl Progress {
    pub fn task_spawned(&self) {
        self.spawned.fetch_add(1, Ordering::AcqRel);
    }

    pub fn task_joined(&self) {
        self.joined.fetch_add(1, Ordering::AcqRel);
    }

    pub fn record(&self, succeeded: bool) {
        let counter = if succeeded {
            &self.committed
        } else {
            &self.failed
        };
        counter.fetch_add(1, Ordering::AcqRel);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            spawned: self.spawned.load(Ordering::Acquire),
            joined: self.joined.load(Ordering::Acquire),
            committed: self.committed.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
        }
    }
}
