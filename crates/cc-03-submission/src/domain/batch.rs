//! # Batch Planning
//!
//! Turns the four source sequences into per-unit submission plans. All
//! record construction happens here, synchronously, before anything is
//! sent to the ledger.
//!
//! ## Unit Layout
//!
//! ```text
//! unit j (source index i = j % len)
//! ├── channel1  DrillToRefinery    {drill.id}{j}{suffix}
//! ├── channel2  RefineryToStorage  {refinery.id}{j}{suffix}
//! ├── channel3  StorageToFactory   {storage.id}{j}{suffix}   (j even)
//! │   channel4  StorageToPump      {storage.id}{j}{suffix}   (j odd)
//! ├── channel5  PumpToCustomer     {pump.id}{j}{suffix}
//! └── channel6  MainChain          {M00x}{j}{suffix}  + appends
//! ```

use cc_01_record_store::{
    DrillToRefinerySchema, MainChainSchema, PumpToCustomerSchema, RefineryToStorageSchema,
    StageSchema, StorageToConsumerSchema,
};
use serde::{Deserialize, Serialize};
use shared_types::{
    AggregateRecord, DrillToRefineryRecord, Partition, PartySummary, PumpToCustomerRecord,
    RefineryToStorageRecord, StorageToConsumerRecord, TelemetrySample,
};

use super::config::AggregateDefaults;
use super::errors::BatchError;

/// Id of a record submitted for unit `unit`.
pub fn derive_id(base: &str, unit: usize, suffix: &str) -> String {
    format!("{base}{unit}{suffix}")
}

/// Source records a batch draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInput {
    pub drill: Vec<DrillToRefineryRecord>,
    pub refinery: Vec<RefineryToStorageRecord>,
    pub storage: Vec<StorageToConsumerRecord>,
    pub pump: Vec<PumpToCustomerRecord>,
}

impl BatchInput {
    /// Every source must hold at least one record.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.drill.is_empty() {
            return Err(BatchError::EmptySource("drill"));
        }
        if self.refinery.is_empty() {
            return Err(BatchError::EmptySource("refinery"));
        }
        if self.storage.is_empty() {
            return Err(BatchError::EmptySource("storage"));
        }
        if self.pump.is_empty() {
            return Err(BatchError::EmptySource("pump"));
        }
        Ok(())
    }

    /// Build the plan for unit `unit`. Sources are cycled independently,
    /// so sequences of different lengths are allowed.
    pub fn plan_unit(
        &self,
        unit: usize,
        suffix: &str,
        defaults: &AggregateDefaults,
        appends: usize,
    ) -> Result<UnitPlan, BatchError> {
        let pick = |len: usize| unit % len;
        let drill = self
            .drill
            .get(pick(self.drill.len().max(1)))
            .ok_or(BatchError::EmptySource("drill"))?;
        let refinery = self
            .refinery
            .get(pick(self.refinery.len().max(1)))
            .ok_or(BatchError::EmptySource("refinery"))?;
        let storage = self
            .storage
            .get(pick(self.storage.len().max(1)))
            .ok_or(BatchError::EmptySource("storage"))?;
        let pump = self
            .pump
            .get(pick(self.pump.len().max(1)))
            .ok_or(BatchError::EmptySource("pump"))?;
        let base_id = defaults
            .base_ids
            .get(pick(defaults.base_ids.len().max(1)))
            .ok_or(BatchError::NoAggregateIds)?;

        let aggregate = build_aggregate(
            derive_id(base_id, unit, suffix),
            drill,
            refinery,
            storage,
            defaults,
        );

        // Appends cycle through the later stages of the journey.
        let journey = [&refinery.telemetry, &storage.telemetry, &pump.telemetry];
        let appends = (0..appends)
            .map(|n| journey[n % journey.len()].clone())
            .collect();

        Ok(UnitPlan {
            unit,
            drill: DrillToRefineryRecord {
                id: derive_id(&drill.id, unit, suffix),
                ..drill.clone()
            },
            refinery: RefineryToStorageRecord {
                id: derive_id(&refinery.id, unit, suffix),
                ..refinery.clone()
            },
            storage_partition: Partition::storage_for_unit(unit),
            storage: StorageToConsumerRecord {
                id: derive_id(&storage.id, unit, suffix),
                ..storage.clone()
            },
            pump: PumpToCustomerRecord {
                id: derive_id(&pump.id, unit, suffix),
                ..pump.clone()
            },
            aggregate,
            appends,
        })
    }
}

/// Aggregate record for one unit, seeded with the drill sample.
pub fn build_aggregate(
    id: String,
    drill: &DrillToRefineryRecord,
    refinery: &RefineryToStorageRecord,
    storage: &StorageToConsumerRecord,
    defaults: &AggregateDefaults,
) -> AggregateRecord {
    AggregateRecord {
        id,
        driller: PartySummary {
            name: drill.driller_name.clone(),
            payment: drill.bill.total_payment.clone(),
            date: drill.date.clone(),
            real_time_status: None,
        },
        refinery: PartySummary {
            name: refinery.name.clone(),
            payment: refinery.bill.total_payment.clone(),
            date: refinery.bill.date.clone(),
            real_time_status: Some(defaults.refinery_status.clone()),
        },
        storage: PartySummary {
            name: refinery.facility_name.clone(),
            payment: refinery.bill.total_payment.clone(),
            date: refinery.bill.date.clone(),
            real_time_status: Some(defaults.storage_status.clone()),
        },
        consumer: PartySummary {
            name: storage.consumer_name.clone(),
            payment: storage.bill.total_payment.clone(),
            date: storage.bill.date.clone(),
            real_time_status: Some(defaults.consumer_status.clone()),
        },
        compliance_report: defaults.compliance_report.clone(),
        total_payment: defaults.total_payment.clone(),
        oil_batch_id: drill.oil_batch_id.clone(),
        quality_certificate: refinery.quality_certificate.clone(),
        quantity: refinery.quantity_certificate.clone(),
        elapsed_time: defaults.elapsed_time.clone(),
        digital_signature: drill.digital_signature.clone(),
        telemetry: vec![drill.telemetry.clone()],
    }
}

/// Everything one unit of work submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPlan {
    pub unit: usize,
    pub drill: DrillToRefineryRecord,
    pub refinery: RefineryToStorageRecord,
    /// `StorageToFactory` for even units, `StorageToPump` for odd ones.
    pub storage_partition: Partition,
    pub storage: StorageToConsumerRecord,
    pub pump: PumpToCustomerRecord,
    pub aggregate: AggregateRecord,
    /// Samples appended to the aggregate after creation, in order.
    pub appends: Vec<TelemetrySample>,
}

/// One `CreateAsset` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSubmission {
    pub unit: usize,
    pub partition: Partition,
    pub record_id: String,
    pub args: Vec<String>,
}

impl UnitPlan {
    /// Stage creates, independent of each other and of the aggregate.
    pub fn stage_submissions(&self) -> Vec<PlannedSubmission> {
        vec![
            self.submission(
                Partition::DrillToRefinery,
                &self.drill.id,
                DrillToRefinerySchema::to_args(&self.drill),
            ),
            self.submission(
                Partition::RefineryToStorage,
                &self.refinery.id,
                RefineryToStorageSchema::to_args(&self.refinery),
            ),
            self.submission(
                self.storage_partition,
                &self.storage.id,
                StorageToConsumerSchema::to_args(&self.storage),
            ),
            self.submission(
                Partition::PumpToCustomer,
                &self.pump.id,
                PumpToCustomerSchema::to_args(&self.pump),
            ),
        ]
    }

    /// Aggregate create on the main chain.
    pub fn aggregate_submission(&self) -> PlannedSubmission {
        self.submission(
            Partition::MainChain,
            &self.aggregate.id,
            MainChainSchema::to_args(&self.aggregate),
        )
    }

    fn submission(&self, partition: Partition, id: &str, args: Vec<String>) -> PlannedSubmission {
        PlannedSubmission {
            unit: self.unit,
            partition,
            record_id: id.to_string(),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::BillingInfo;

    fn sample(tag: &str) -> TelemetrySample {
        TelemetrySample {
            temperature: format!("{tag}-t"),
            ..Default::default()
        }
    }

    fn input() -> BatchInput {
        BatchInput {
            drill: vec![
                DrillToRefineryRecord {
                    id: "D001".into(),
                    driller_name: "North Rig".into(),
                    oil_batch_id: "OIL-1".into(),
                    digital_signature: "sig-d".into(),
                    date: "2024-01-01".into(),
                    bill: BillingInfo {
                        total_payment: "$ 10,000".into(),
                        ..Default::default()
                    },
                    telemetry: sample("drill"),
                    ..Default::default()
                },
                DrillToRefineryRecord {
                    id: "D002".into(),
                    telemetry: sample("drill2"),
                    ..Default::default()
                },
            ],
            refinery: vec![RefineryToStorageRecord {
                id: "R001".into(),
                name: "Refinery A".into(),
                facility_name: "Tank Farm".into(),
                quality_certificate: "QC-1".into(),
                quantity_certificate: "QN-1".into(),
                telemetry: sample("refinery"),
                ..Default::default()
            }],
            storage: vec![StorageToConsumerRecord {
                id: "S001".into(),
                consumer_name: "Factory 9".into(),
                telemetry: sample("storage"),
                ..Default::default()
            }],
            pump: vec![PumpToCustomerRecord {
                id: "P001".into(),
                telemetry: sample("pump"),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_ids_share_unit_and_suffix() {
        let plan = input()
            .plan_unit(3, "42", &AggregateDefaults::default(), 0)
            .unwrap();
        assert_eq!(plan.drill.id, "D002342");
        assert_eq!(plan.refinery.id, "R001342");
        assert_eq!(plan.storage.id, "S001342");
        assert_eq!(plan.pump.id, "P001342");
        assert_eq!(plan.aggregate.id, "M004342");
    }

    #[test]
    fn test_storage_routing_by_parity() {
        let input = input();
        let defaults = AggregateDefaults::default();
        let even = input.plan_unit(0, "1", &defaults, 0).unwrap();
        let odd = input.plan_unit(1, "1", &defaults, 0).unwrap();

        assert_eq!(even.storage_partition, Partition::StorageToFactory);
        assert_eq!(odd.storage_partition, Partition::StorageToPump);
        assert_eq!(even.stage_submissions()[2].partition, Partition::StorageToFactory);
        assert_eq!(odd.stage_submissions()[2].partition, Partition::StorageToPump);
    }

    #[test]
    fn test_aggregate_draws_from_sources() {
        let plan = input()
            .plan_unit(0, "7", &AggregateDefaults::default(), 0)
            .unwrap();
        let agg = &plan.aggregate;

        assert_eq!(agg.driller.name, "North Rig");
        assert_eq!(agg.driller.payment, "$ 10,000");
        assert_eq!(agg.refinery.name, "Refinery A");
        assert_eq!(agg.refinery.real_time_status.as_deref(), Some("High in Demand"));
        assert_eq!(agg.storage.name, "Tank Farm");
        assert_eq!(agg.consumer.name, "Factory 9");
        assert_eq!(agg.oil_batch_id, "OIL-1");
        assert_eq!(agg.quality_certificate, "QC-1");
        assert_eq!(agg.quantity, "QN-1");
        assert_eq!(agg.digital_signature, "sig-d");
        assert_eq!(agg.total_payment, "$ 110,000");
        assert_eq!(agg.telemetry, vec![sample("drill")]);
    }

    #[test]
    fn test_appends_cycle_through_later_stages() {
        let plan = input()
            .plan_unit(0, "7", &AggregateDefaults::default(), 4)
            .unwrap();
        assert_eq!(
            plan.appends,
            vec![
                sample("refinery"),
                sample("storage"),
                sample("pump"),
                sample("refinery")
            ]
        );
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let mut input = input();
        input.pump.clear();
        assert!(matches!(input.validate(), Err(BatchError::EmptySource("pump"))));
    }

    #[test]
    fn test_planned_args_carry_derived_id() {
        let plan = input()
            .plan_unit(1, "5", &AggregateDefaults::default(), 0)
            .unwrap();
        for submission in plan.stage_submissions() {
            assert_eq!(submission.args[0], submission.record_id);
        }
        let aggregate = plan.aggregate_submission();
        assert_eq!(aggregate.partition, Partition::MainChain);
        assert_eq!(aggregate.args.len(), MainChainSchema::create_arity());
    }

    proptest! {
        #[test]
        fn prop_units_never_share_ids(a in 0usize..500, b in 0usize..500) {
            prop_assume!(a != b);
            let input = input();
            let defaults = AggregateDefaults::default();
            let pa = input.plan_unit(a, "9", &defaults, 0).unwrap();
            let pb = input.plan_unit(b, "9", &defaults, 0).unwrap();
            prop_assert_ne!(pa.drill.id, pb.drill.id);
            prop_assert_ne!(pa.aggregate.id, pb.aggregate.id);
        }
    }
}
