//! Scripted fault injection.
//!
//! Rules are keyed by partition and record key. A rule either fails every
//! call for that key or a fixed number of calls before letting them through.

use std::collections::HashMap;

use parking_lot::Mutex;
use shared_types::Partition;
use tracing::debug;

use crate::ports::outbound::FaultInjector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Remaining {
    Always,
    Times(u32),
}

/// Fault injector for tests and demos.
#[derive(Debug, Default)]
pub struct ScriptedFaults {
    rules: Mutex<HashMap<(Partition, String), Remaining>>,
}

impl ScriptedFaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call addressing `key` on `partition`.
    pub fn fail_always(&self, partition: Partition, key: impl Into<String>) {
        self.rules
            .lock()
            .insert((partition, key.into()), Remaining::Always);
    }

    /// Fail the next `times` calls addressing `key` on `partition`.
    pub fn fail_times(&self, partition: Partition, key: impl Into<String>, times: u32) {
        self.rules
            .lock()
            .insert((partition, key.into()), Remaining::Times(times));
    }

    pub fn clear(&self) {
        self.rules.lock().clear();
    }
}

impl FaultInjector for ScriptedFaults {
    fn should_fail(&self, partition: Partition, function: &str, args: &[String]) -> bool {
        let Some(key) = args.first() else {
            return false;
        };
        let mut rules = self.rules.lock();
        let Some(remaining) = rules.get_mut(&(partition, key.clone())) else {
            return false;
        };
        let fail = match remaining {
            Remaining::Always => true,
            Remaining::Times(0) => false,
            Remaining::Times(n) => {
                *n -= 1;
                true
            }
        };
        if fail {
            debug!("[cc-02] Injecting fault into {} {} for {}", partition, function, key);
        }
        fail
    }
}
