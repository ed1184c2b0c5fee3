//! # Record Store Service
//!
//! `RecordStore<S>` is the single contract implementation shared by every
//! partition. The schema parameter supplies the record shape, the create
//! field order, the read semantics and the telemetry policy.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use shared_types::{operations, Partition, TelemetrySample};
use tracing::debug;

use crate::domain::errors::ContractError;
use crate::domain::schema::{parse_telemetry_args, Lookup, StageSchema, TelemetryPolicy};
use crate::domain::selector::FieldSelector;
use crate::domain::stages::{
    DrillToRefinerySchema, MainChainSchema, PumpToCustomerSchema, RefineryToStorageSchema,
    StorageToConsumerSchema,
};
use crate::ports::inbound::Contract;
use crate::ports::outbound::ChaincodeStub;

/// Outcome of `ReadAsset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult<R> {
    /// Direct key lookup.
    Single(R),
    /// Field-selector scan, never empty.
    Matches(Vec<R>),
}

impl<R> ReadResult<R> {
    /// Flatten into a list of records.
    pub fn into_vec(self) -> Vec<R> {
        match self {
            ReadResult::Single(record) => vec![record],
            ReadResult::Matches(records) => records,
        }
    }
}

impl<R: Serialize> ReadResult<R> {
    /// Wire form: an object for key lookups, an array for selector scans.
    pub fn to_json(&self) -> Result<Vec<u8>, ContractError> {
        match self {
            ReadResult::Single(record) => encode("ReadAsset", record),
            ReadResult::Matches(records) => encode("ReadAsset", records),
        }
    }
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Vec<u8>, ContractError> {
    serde_json::to_vec(value).map_err(|e| ContractError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Custody contract for one partition.
pub struct RecordStore<S: StageSchema> {
    partition: Partition,
    _schema: PhantomData<fn() -> S>,
}

impl<S: StageSchema> RecordStore<S> {
    /// Contract serving `partition` with schema `S`.
    pub fn new(partition: Partition) -> Self {
        Self {
            partition,
            _schema: PhantomData,
        }
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    fn decode(key: &str, bytes: &[u8]) -> Result<S::Record, ContractError> {
        serde_json::from_slice(bytes).map_err(|e| ContractError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// True when `id` holds a live record.
    pub fn exists(&self, stub: &mut dyn ChaincodeStub, id: &str) -> Result<bool, ContractError> {
        Ok(stub.get_state(id)?.is_some())
    }

    /// Store a new record.
    ///
    /// ## Errors
    ///
    /// - `AlreadyExists`: the key is live
    pub fn create(
        &self,
        stub: &mut dyn ChaincodeStub,
        record: &S::Record,
    ) -> Result<(), ContractError> {
        let id = S::record_id(record);
        if self.exists(stub, id)? {
            return Err(ContractError::AlreadyExists { id: id.to_string() });
        }
        let bytes = encode(id, record)?;
        stub.put_state(id, bytes)?;
        debug!(
            "[cc-01] {} created {} on {}",
            S::NAME,
            id,
            self.partition
        );
        Ok(())
    }

    /// Decode positional `CreateAsset` arguments and store the record.
    pub fn create_from_args(
        &self,
        stub: &mut dyn ChaincodeStub,
        args: &[String],
    ) -> Result<S::Record, ContractError> {
        let record = S::from_args(args)?;
        self.create(stub, &record)?;
        Ok(record)
    }

    /// Direct key lookup.
    pub fn read_by_key(
        &self,
        stub: &mut dyn ChaincodeStub,
        id: &str,
    ) -> Result<S::Record, ContractError> {
        match stub.get_state(id)? {
            Some(bytes) => Self::decode(id, &bytes),
            None => Err(ContractError::NotFound { id: id.to_string() }),
        }
    }

    /// Every record whose embedded field matches the selector.
    ///
    /// ## Errors
    ///
    /// - `NoMatches`: nothing matched
    /// - `Serialization`: a matching document does not decode as `S::Record`
    pub fn query(
        &self,
        stub: &mut dyn ChaincodeStub,
        selector: &FieldSelector,
    ) -> Result<Vec<S::Record>, ContractError> {
        let mut matches = Vec::new();
        for (key, bytes) in stub.get_state_by_range("", "")? {
            // Documents that are not JSON at all cannot match anything.
            let Ok(document) = serde_json::from_slice::<Value>(&bytes) else {
                continue;
            };
            if selector.matches(&document) {
                let record = serde_json::from_value(document).map_err(|e| {
                    ContractError::Serialization {
                        key: key.clone(),
                        message: e.to_string(),
                    }
                })?;
                matches.push(record);
            }
        }
        if matches.is_empty() {
            return Err(ContractError::NoMatches {
                field: selector.field().to_string(),
                value: selector.value().to_string(),
            });
        }
        Ok(matches)
    }

    /// `ReadAsset` following the schema's lookup mode.
    pub fn read(
        &self,
        stub: &mut dyn ChaincodeStub,
        arg: &str,
    ) -> Result<ReadResult<S::Record>, ContractError> {
        match S::LOOKUP {
            Lookup::Key => self.read_by_key(stub, arg).map(ReadResult::Single),
            Lookup::Field(field) => self
                .query(stub, &FieldSelector::new(field, arg))
                .map(ReadResult::Matches),
        }
    }

    /// Open-ended scan over the whole partition, in ledger key order.
    pub fn read_all(&self, stub: &mut dyn ChaincodeStub) -> Result<Vec<S::Record>, ContractError> {
        stub.get_state_by_range("", "")?
            .into_iter()
            .map(|(key, bytes)| Self::decode(&key, &bytes))
            .collect()
    }

    /// Remove a live record.
    pub fn delete(&self, stub: &mut dyn ChaincodeStub, id: &str) -> Result<(), ContractError> {
        if !self.exists(stub, id)? {
            return Err(ContractError::NotFound { id: id.to_string() });
        }
        stub.del_state(id)?;
        debug!("[cc-01] {} deleted {} on {}", S::NAME, id, self.partition);
        Ok(())
    }

    /// Read-modify-write of the telemetry field. Returns the updated record.
    pub fn update_telemetry(
        &self,
        stub: &mut dyn ChaincodeStub,
        id: &str,
        sample: TelemetrySample,
    ) -> Result<S::Record, ContractError> {
        let mut record = self.read_by_key(stub, id)?;
        S::apply_telemetry(&mut record, sample);
        let bytes = encode(id, &record)?;
        stub.put_state(id, bytes)?;
        debug!(
            "[cc-01] {} telemetry {:?} on {} for {}",
            S::NAME,
            S::TELEMETRY,
            self.partition,
            id
        );
        Ok(record)
    }

    fn single_arg<'a>(function: &str, args: &'a [String]) -> Result<&'a str, ContractError> {
        match args {
            [only] => Ok(only.as_str()),
            _ => Err(ContractError::InvalidArguments {
                operation: function.to_string(),
                expected: 1,
                got: args.len(),
            }),
        }
    }
}

impl<S: StageSchema> Contract for RecordStore<S> {
    fn partition(&self) -> Partition {
        self.partition
    }

    fn invoke(
        &self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        match function {
            operations::CREATE => {
                self.create_from_args(stub, args)?;
                Ok(Vec::new())
            }
            operations::READ => {
                let arg = Self::single_arg(function, args)?;
                self.read(stub, arg)?.to_json()
            }
            operations::READ_ALL => {
                if !args.is_empty() {
                    return Err(ContractError::InvalidArguments {
                        operation: function.to_string(),
                        expected: 0,
                        got: args.len(),
                    });
                }
                let records = self.read_all(stub)?;
                encode(function, &records)
            }
            operations::DELETE => {
                let id = Self::single_arg(function, args)?;
                self.delete(stub, id)?;
                Ok(Vec::new())
            }
            operations::EXISTS => {
                let id = Self::single_arg(function, args)?;
                let found = self.exists(stub, id)?;
                Ok(found.to_string().into_bytes())
            }
            f if f == S::TELEMETRY.operation() => {
                let (id, sample) = parse_telemetry_args(function, args)?;
                let record = self.update_telemetry(stub, &id, sample)?;
                encode(&id, &record)
            }
            other => Err(ContractError::UnknownOperation(other.to_string())),
        }
    }
}

/// Contract deployed on `partition`.
pub fn deploy(partition: Partition) -> Arc<dyn Contract> {
    match partition {
        Partition::DrillToRefinery => Arc::new(RecordStore::<DrillToRefinerySchema>::new(partition)),
        Partition::RefineryToStorage => {
            Arc::new(RecordStore::<RefineryToStorageSchema>::new(partition))
        }
        Partition::StorageToFactory | Partition::StorageToPump => {
            Arc::new(RecordStore::<StorageToConsumerSchema>::new(partition))
        }
        Partition::PumpToCustomer => Arc::new(RecordStore::<PumpToCustomerSchema>::new(partition)),
        Partition::MainChain => Arc::new(RecordStore::<MainChainSchema>::new(partition)),
    }
}

/// Telemetry policy of the contract deployed on `partition`.
pub fn telemetry_policy(partition: Partition) -> TelemetryPolicy {
    match partition {
        Partition::DrillToRefinery => DrillToRefinerySchema::TELEMETRY,
        Partition::RefineryToStorage => RefineryToStorageSchema::TELEMETRY,
        Partition::StorageToFactory | Partition::StorageToPump => StorageToConsumerSchema::TELEMETRY,
        Partition::PumpToCustomer => PumpToCustomerSchema::TELEMETRY,
        Partition::MainChain => MainChainSchema::TELEMETRY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStub;
    use proptest::prelude::*;
    use shared_types::{AggregateRecord, DrillToRefineryRecord, PumpToCustomerRecord};
    use std::collections::BTreeSet;

    fn sample(tag: &str) -> TelemetrySample {
        TelemetrySample {
            temperature: format!("{tag}-t"),
            pressure: format!("{tag}-p"),
            location: format!("{tag}-l"),
            quantity: format!("{tag}-q"),
            quality: format!("{tag}-g"),
        }
    }

    fn drill(id: &str, batch: &str) -> DrillToRefineryRecord {
        DrillToRefineryRecord {
            id: id.to_string(),
            driller_name: "North Rig".to_string(),
            oil_batch_id: batch.to_string(),
            telemetry: sample(id),
            ..Default::default()
        }
    }

    fn pump(id: &str) -> PumpToCustomerRecord {
        PumpToCustomerRecord {
            id: id.to_string(),
            name: "Pump 4".to_string(),
            telemetry: sample(id),
            ..Default::default()
        }
    }

    fn aggregate(id: &str) -> AggregateRecord {
        AggregateRecord {
            id: id.to_string(),
            telemetry: vec![sample("initial")],
            ..Default::default()
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_twice_fails_with_already_exists() {
        let store = RecordStore::<PumpToCustomerSchema>::new(Partition::PumpToCustomer);
        let mut stub = InMemoryStub::new();

        store.create(&mut stub, &pump("P0010")).unwrap();
        let err = store.create(&mut stub, &pump("P0010")).unwrap_err();

        assert!(err.is_already_exists());
        assert_eq!(stub.len(), 1);
    }

    #[test]
    fn test_absent_id_is_not_found_everywhere() {
        let store = RecordStore::<MainChainSchema>::new(Partition::MainChain);
        let mut stub = InMemoryStub::new();

        assert!(store.read_by_key(&mut stub, "M404").unwrap_err().is_not_found());
        assert!(store.delete(&mut stub, "M404").unwrap_err().is_not_found());
        assert!(store
            .update_telemetry(&mut stub, "M404", sample("x"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_deleted_id_is_gone() {
        let store = RecordStore::<PumpToCustomerSchema>::new(Partition::PumpToCustomer);
        let mut stub = InMemoryStub::new();

        store.create(&mut stub, &pump("P0011")).unwrap();
        store.delete(&mut stub, "P0011").unwrap();

        assert!(!store.exists(&mut stub, "P0011").unwrap());
        assert!(store.read_by_key(&mut stub, "P0011").unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_all_returns_created_set() {
        let store = RecordStore::<PumpToCustomerSchema>::new(Partition::PumpToCustomer);
        let mut stub = InMemoryStub::new();
        assert!(store.read_all(&mut stub).unwrap().is_empty());

        for id in ["c", "a", "b"] {
            store.create(&mut stub, &pump(id)).unwrap();
        }
        let ids: BTreeSet<_> = store
            .read_all(&mut stub)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, BTreeSet::from(["a".to_string(), "b".to_string(), "c".to_string()]));
    }

    #[test]
    fn test_stored_record_reads_back_equal() {
        let store = RecordStore::<PumpToCustomerSchema>::new(Partition::PumpToCustomer);
        let mut stub = InMemoryStub::new();
        let record = pump("P0012");

        store.create(&mut stub, &record).unwrap();
        assert_eq!(store.read_by_key(&mut stub, "P0012").unwrap(), record);
    }

    #[test]
    fn test_selector_read_returns_every_match() {
        let store = RecordStore::<DrillToRefinerySchema>::new(Partition::DrillToRefinery);
        let mut stub = InMemoryStub::new();
        store.create(&mut stub, &drill("D0010", "OIL-1")).unwrap();
        store.create(&mut stub, &drill("D0011", "OIL-1")).unwrap();
        store.create(&mut stub, &drill("D0012", "OIL-2")).unwrap();

        let found = store.read(&mut stub, "OIL-1").unwrap().into_vec();
        assert_eq!(found.len(), 2);

        let err = store.read(&mut stub, "OIL-9").unwrap_err();
        assert!(matches!(err, ContractError::NoMatches { .. }));
    }

    #[test]
    fn test_malformed_document_is_serialization_error() {
        let store = RecordStore::<PumpToCustomerSchema>::new(Partition::PumpToCustomer);
        let mut stub = InMemoryStub::new();
        stub.insert_raw("P0013", b"{not json".to_vec());

        let err = store.read_by_key(&mut stub, "P0013").unwrap_err();
        assert!(matches!(err, ContractError::Serialization { .. }));
    }

    #[test]
    fn test_stage_telemetry_replaces_sample() {
        let store = RecordStore::<PumpToCustomerSchema>::new(Partition::PumpToCustomer);
        let mut stub = InMemoryStub::new();
        store.create(&mut stub, &pump("P0014")).unwrap();

        let updated = store
            .update_telemetry(&mut stub, "P0014", sample("new"))
            .unwrap();
        assert_eq!(updated.telemetry, sample("new"));
        assert_eq!(store.read_by_key(&mut stub, "P0014").unwrap(), updated);
    }

    #[test]
    fn test_dispatch_by_operation_name() {
        let contract = deploy(Partition::MainChain);
        let mut stub = InMemoryStub::new();
        let args = MainChainSchema::to_args(&aggregate("M0010"));

        contract.invoke(&mut stub, "CreateAsset", &args).unwrap();

        let exists = contract
            .invoke(&mut stub, "AssetExists", &strings(&["M0010"]))
            .unwrap();
        assert_eq!(exists, b"true");

        let mut update = strings(&["M0010"]);
        update.extend(strings(&["1", "2", "3", "4", "5"]));
        let body = contract.invoke(&mut stub, "UpdateIoTLogs", &update).unwrap();
        let updated: AggregateRecord = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.telemetry.len(), 2);

        let all = contract.invoke(&mut stub, "GetAllAssets", &[]).unwrap();
        let all: Vec<AggregateRecord> = serde_json::from_slice(&all).unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_dispatch_rejects_wrong_telemetry_operation() {
        let contract = deploy(Partition::MainChain);
        let mut stub = InMemoryStub::new();
        let err = contract
            .invoke(&mut stub, "ChangeIotData", &strings(&["M1"]))
            .unwrap_err();
        assert_eq!(err, ContractError::UnknownOperation("ChangeIotData".into()));
    }

    #[test]
    fn test_read_shapes_on_the_wire() {
        let mut stub = InMemoryStub::new();
        let contract = deploy(Partition::DrillToRefinery);
        let args = DrillToRefinerySchema::to_args(&drill("D0020", "OIL-5"));
        contract.invoke(&mut stub, "CreateAsset", &args).unwrap();
        let body = contract
            .invoke(&mut stub, "ReadAsset", &strings(&["OIL-5"]))
            .unwrap();
        assert!(serde_json::from_slice::<Value>(&body).unwrap().is_array());

        let mut stub = InMemoryStub::new();
        let contract = deploy(Partition::PumpToCustomer);
        let args = PumpToCustomerSchema::to_args(&pump("P0020"));
        contract.invoke(&mut stub, "CreateAsset", &args).unwrap();
        let body = contract
            .invoke(&mut stub, "ReadAsset", &strings(&["P0020"]))
            .unwrap();
        assert!(serde_json::from_slice::<Value>(&body).unwrap().is_object());
    }

    #[test]
    fn test_empty_partition_lists_as_empty_array() {
        let contract = deploy(Partition::StorageToPump);
        let mut stub = InMemoryStub::new();
        let body = contract.invoke(&mut stub, "GetAllAssets", &[]).unwrap();
        assert_eq!(body, b"[]");
    }

    #[test]
    fn test_only_main_chain_appends() {
        for partition in Partition::STAGES {
            assert_eq!(telemetry_policy(partition), TelemetryPolicy::Replace);
        }
        assert_eq!(telemetry_policy(Partition::MainChain), TelemetryPolicy::Append);
    }

    proptest! {
        #[test]
        fn prop_create_then_exists(id in "[A-Z][0-9]{1,6}") {
            let store = RecordStore::<PumpToCustomerSchema>::new(Partition::PumpToCustomer);
            let mut stub = InMemoryStub::new();

            store.create(&mut stub, &pump(&id)).unwrap();
            prop_assert!(store.exists(&mut stub, &id).unwrap());
            prop_assert!(store.create(&mut stub, &pump(&id)).unwrap_err().is_already_exists());
        }

        #[test]
        fn prop_appends_are_strictly_additive(k in 0usize..12) {
            let store = RecordStore::<MainChainSchema>::new(Partition::MainChain);
            let mut stub = InMemoryStub::new();
            store.create(&mut stub, &aggregate("M001")).unwrap();

            for i in 0..k {
                store.update_telemetry(&mut stub, "M001", sample(&i.to_string())).unwrap();
            }
            let record = store.read_by_key(&mut stub, "M001").unwrap();
            prop_assert_eq!(record.telemetry.len(), 1 + k);
            prop_assert_eq!(&record.telemetry[0], &sample("initial"));
        }
    }
}
