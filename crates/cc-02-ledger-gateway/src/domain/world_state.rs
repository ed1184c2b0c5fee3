//! # Versioned World State
//!
//! Each partition keeps its current key/value mapping together with the
//! block number that last wrote each key. Transactions are simulated against
//! a read view, producing a read/write set that is validated and applied at
//! commit time.
//!
//! ## Commit Validation
//!
//! ```text
//! endorse:  read set {key -> version seen}   write set {key -> put | delete}
//!              │
//! commit:   every version still current? ──no──→ MvccReadConflict (discard)
//!              │ yes
//!           every scanned range unchanged? ──no──→ PhantomReadConflict
//!              │ yes
//!           apply write set at block N ──→ Valid
//! ```

use std::collections::BTreeMap;
use std::ops::Bound;

use cc_01_record_store::{ChaincodeStub, ContractError};

use super::commit::TxValidationCode;

/// A stored value and the block that wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: u64,
}

/// Range scanned during simulation and what it saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRead {
    pub start: String,
    pub end: String,
    pub observed: Vec<(String, u64)>,
}

/// Outcome of simulating one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadWriteSet {
    /// Key to the version observed (`None` = absent).
    pub reads: BTreeMap<String, Option<u64>>,
    pub ranges: Vec<RangeRead>,
    /// Key to the new value (`None` = delete).
    pub writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl ReadWriteSet {
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }
}

fn bounds<'a>(start: &'a str, end: &'a str) -> (Bound<&'a str>, Bound<&'a str>) {
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

fn empty_range(start: &str, end: &str) -> bool {
    !start.is_empty() && !end.is_empty() && start >= end
}

/// Committed state of one partition.
#[derive(Debug, Default)]
pub struct PartitionState {
    entries: BTreeMap<String, VersionedValue>,
    height: u64,
}

impl PartitionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed blocks.
    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&VersionedValue> {
        self.entries.get(key)
    }

    /// Committed entries in `[start, end)`, key ordered.
    pub fn range(&self, start: &str, end: &str) -> Vec<(&String, &VersionedValue)> {
        if empty_range(start, end) {
            return Vec::new();
        }
        self.entries.range::<str, _>(bounds(start, end)).collect()
    }

    fn observe_range(&self, start: &str, end: &str) -> Vec<(String, u64)> {
        self.range(start, end)
            .into_iter()
            .map(|(k, v)| (k.clone(), v.version))
            .collect()
    }

    /// Check a read/write set against the current state.
    pub fn validate(&self, rwset: &ReadWriteSet) -> TxValidationCode {
        let stale = rwset
            .reads
            .iter()
            .any(|(key, seen)| self.entries.get(key).map(|v| v.version) != *seen);
        if stale {
            return TxValidationCode::MvccReadConflict;
        }
        let phantom = rwset
            .ranges
            .iter()
            .any(|r| self.observe_range(&r.start, &r.end) != r.observed);
        if phantom {
            return TxValidationCode::PhantomReadConflict;
        }
        TxValidationCode::Valid
    }

    /// Order a transaction into the next block: validate, then apply the
    /// writes when valid. Returns the block number and validation code.
    pub fn commit(&mut self, rwset: &ReadWriteSet) -> (u64, TxValidationCode) {
        self.height += 1;
        let block = self.height;
        let code = self.validate(rwset);
        if code.is_valid() {
            for (key, write) in &rwset.writes {
                match write {
                    Some(value) => {
                        self.entries.insert(
                            key.clone(),
                            VersionedValue {
                                value: value.clone(),
                                version: block,
                            },
                        );
                    }
                    None => {
                        self.entries.remove(key);
                    }
                }
            }
        }
        (block, code)
    }
}

/// Transaction simulator handed to a contract during endorsement.
///
/// Reads go to the committed state (recording the version seen) unless the
/// transaction already wrote the key. Writes stay in the write set.
pub struct TxSimulator<'a> {
    state: &'a PartitionState,
    rwset: ReadWriteSet,
}

impl<'a> TxSimulator<'a> {
    pub fn new(state: &'a PartitionState) -> Self {
        Self {
            state,
            rwset: ReadWriteSet::default(),
        }
    }

    pub fn into_rwset(self) -> ReadWriteSet {
        self.rwset
    }
}

impl ChaincodeStub for TxSimulator<'_> {
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, ContractError> {
        if let Some(pending) = self.rwset.writes.get(key) {
            return Ok(pending.clone());
        }
        let committed = self.state.get(key);
        self.rwset
            .reads
            .entry(key.to_string())
            .or_insert_with(|| committed.map(|v| v.version));
        Ok(committed.map(|v| v.value.clone()))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), ContractError> {
        if key.is_empty() {
            return Err(ContractError::State("empty key".to_string()));
        }
        self.rwset.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), ContractError> {
        self.rwset.writes.insert(key.to_string(), None);
        Ok(())
    }

    fn get_state_by_range(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, ContractError> {
        let committed = self.state.range(start, end);
        self.rwset.ranges.push(RangeRead {
            start: start.to_string(),
            end: end.to_string(),
            observed: committed
                .iter()
                .map(|(k, v)| ((*k).clone(), v.version))
                .collect(),
        });

        let mut merged: BTreeMap<String, Vec<u8>> = committed
            .into_iter()
            .map(|(k, v)| (k.clone(), v.value.clone()))
            .collect();
        if !empty_range(start, end) {
            for (key, write) in self.rwset.writes.range::<str, _>(bounds(start, end)) {
                match write {
                    Some(value) => {
                        merged.insert(key.clone(), value.clone());
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            }
        }
        Ok(merged.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed(pairs: &[(&str, &str)]) -> PartitionState {
        let mut state = PartitionState::new();
        let mut rwset = ReadWriteSet::default();
        for (k, v) in pairs {
            rwset
                .writes
                .insert(k.to_string(), Some(v.as_bytes().to_vec()));
        }
        state.commit(&rwset);
        state
    }

    #[test]
    fn test_simulator_sees_own_writes() {
        let state = committed(&[("a", "1")]);
        let mut sim = TxSimulator::new(&state);

        sim.put_state("b", b"2".to_vec()).unwrap();
        sim.del_state("a").unwrap();

        assert_eq!(sim.get_state("b").unwrap(), Some(b"2".to_vec()));
        assert_eq!(sim.get_state("a").unwrap(), None);
        let keys: Vec<_> = sim
            .get_state_by_range("", "")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["b"]);
        // Committed state untouched until commit.
        assert!(state.get("a").is_some());
    }

    #[test]
    fn test_stale_read_is_mvcc_conflict() {
        let mut state = committed(&[("k", "v1")]);

        let mut first = TxSimulator::new(&state);
        first.get_state("k").unwrap();
        first.put_state("k", b"v2".to_vec()).unwrap();
        let first = first.into_rwset();

        let mut second = TxSimulator::new(&state);
        second.get_state("k").unwrap();
        second.put_state("k", b"v3".to_vec()).unwrap();
        let second = second.into_rwset();

        assert_eq!(state.commit(&first).1, TxValidationCode::Valid);
        assert_eq!(state.commit(&second).1, TxValidationCode::MvccReadConflict);
        assert_eq!(state.get("k").unwrap().value, b"v2".to_vec());
    }

    #[test]
    fn test_absent_key_race_is_detected() {
        let mut state = PartitionState::new();

        let mut a = TxSimulator::new(&state);
        assert!(a.get_state("id").unwrap().is_none());
        a.put_state("id", b"a".to_vec()).unwrap();
        let a = a.into_rwset();

        let mut b = TxSimulator::new(&state);
        assert!(b.get_state("id").unwrap().is_none());
        b.put_state("id", b"b".to_vec()).unwrap();
        let b = b.into_rwset();

        assert!(state.commit(&a).1.is_valid());
        assert_eq!(state.commit(&b).1, TxValidationCode::MvccReadConflict);
    }

    #[test]
    fn test_range_change_is_phantom_conflict() {
        let mut state = committed(&[("a", "1")]);

        let mut scan = TxSimulator::new(&state);
        scan.get_state_by_range("", "").unwrap();
        scan.put_state("summary", b"1 record".to_vec()).unwrap();
        let scan = scan.into_rwset();

        let mut insert = TxSimulator::new(&state);
        insert.put_state("b", b"2".to_vec()).unwrap();
        let insert = insert.into_rwset();

        assert!(state.commit(&insert).1.is_valid());
        assert_eq!(state.commit(&scan).1, TxValidationCode::PhantomReadConflict);
    }

    #[test]
    fn test_versions_follow_block_numbers() {
        let mut state = committed(&[("a", "1")]);
        assert_eq!(state.get("a").unwrap().version, 1);

        let mut rwset = ReadWriteSet::default();
        rwset.writes.insert("a".into(), Some(b"2".to_vec()));
        let (block, code) = state.commit(&rwset);

        assert_eq!(block, 2);
        assert!(code.is_valid());
        assert_eq!(state.get("a").unwrap().version, 2);
        assert_eq!(state.height(), 2);
    }
}
