//! In-memory world state for running a contract without a ledger.
//!
//! Writes land immediately; there is no transaction boundary.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::domain::errors::ContractError;
use crate::ports::outbound::ChaincodeStub;

/// In-memory stub for unit tests and tooling.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStub {
    state: BTreeMap<String, Vec<u8>>,
}

impl InMemoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Raw document stored under `key`.
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.state.get(key).map(Vec::as_slice)
    }

    /// Store bytes under `key` without going through a contract.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.state.insert(key.into(), value.into());
    }
}

/// Range bounds for a `get_state_by_range` call; empty means open.
pub(crate) fn range_bounds<'a>(start: &'a str, end: &'a str) -> (Bound<&'a str>, Bound<&'a str>) {
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start)
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };
    (lower, upper)
}

impl ChaincodeStub for InMemoryStub {
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, ContractError> {
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), ContractError> {
        self.state.insert(key.to_string(), value);
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), ContractError> {
        self.state.remove(key);
        Ok(())
    }

    fn get_state_by_range(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, ContractError> {
        if !start.is_empty() && !end.is_empty() && start >= end {
            return Ok(Vec::new());
        }
        Ok(self
            .state
            .range::<str, _>(range_bounds(start, end))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
