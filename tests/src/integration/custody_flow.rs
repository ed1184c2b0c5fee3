//! Batch submission through the ledger and back out of the query client.

use std::collections::BTreeSet;

use cc_03_submission::OrchestratorConfig;
use shared_types::{
    DrillToRefineryRecord, Partition, PumpToCustomerRecord, StorageToConsumerRecord,
};

use super::fixtures::{fast_config, harness, sample, source_batch};

#[tokio::test]
async fn test_two_unit_batch_parity_and_aggregate_growth() {
    let h = harness(OrchestratorConfig {
        aggregate_appends: 3,
        ..fast_config()
    });

    let report = h
        .orchestrator
        .submit_batch(&source_batch(), 2)
        .await
        .unwrap();
    assert!(report.is_clean(), "{report}");

    // Unit 0 lands on the factory partition, unit 1 on the pump partition.
    let factory: Vec<StorageToConsumerRecord> = h
        .queries
        .list_records(Partition::StorageToFactory)
        .await
        .unwrap();
    let pumps: Vec<StorageToConsumerRecord> = h
        .queries
        .list_records(Partition::StorageToPump)
        .await
        .unwrap();
    assert_eq!(factory.len(), 1);
    assert_eq!(factory[0].id, "S01700000000");
    assert_eq!(pumps.len(), 1);
    assert_eq!(pumps[0].id, "S11700000001");

    for id in ["M00101700000000", "M00211700000001"] {
        let aggregate = h.queries.aggregate(id).await.unwrap();
        assert_eq!(aggregate.telemetry.len(), 4);
        assert_eq!(aggregate.initial_sample(), Some(&sample("drill")));
        assert_eq!(aggregate.latest_sample(), Some(&sample("pump")));
    }
}

#[tokio::test]
async fn test_aggregate_has_single_sample_before_appends() {
    let h = harness(OrchestratorConfig {
        aggregate_appends: 0,
        ..fast_config()
    });
    h.orchestrator
        .submit_batch(&source_batch(), 2)
        .await
        .unwrap();

    let aggregate = h.queries.aggregate("M00101700000000").await.unwrap();
    assert_eq!(aggregate.telemetry, vec![sample("drill")]);
    assert_eq!(aggregate.oil_batch_id, "OIL-100");
    assert_eq!(aggregate.quality_certificate, "QC-8");
    assert_eq!(aggregate.storage.name, "Fao Storage");
    assert_eq!(aggregate.driller.real_time_status, None);
}

#[tokio::test]
async fn test_read_all_returns_exactly_the_created_ids() {
    let h = harness(OrchestratorConfig {
        aggregate_appends: 0,
        ..fast_config()
    });
    h.orchestrator
        .submit_batch(&source_batch(), 3)
        .await
        .unwrap();

    let drills: Vec<DrillToRefineryRecord> = h
        .queries
        .list_records(Partition::DrillToRefinery)
        .await
        .unwrap();
    let ids: BTreeSet<String> = drills.into_iter().map(|r| r.id).collect();
    let expected: BTreeSet<String> = ["D01700000000", "D11700000001", "D21700000002"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_stored_record_reads_back_field_for_field() {
    let h = harness(OrchestratorConfig {
        aggregate_appends: 0,
        ..fast_config()
    });
    h.orchestrator
        .submit_batch(&source_batch(), 1)
        .await
        .unwrap();

    let result = h
        .queries
        .get_by_id(Partition::PumpToCustomer, "P01700000000")
        .await
        .unwrap();
    let stored: Vec<PumpToCustomerRecord> = result.records().unwrap();

    let expected = PumpToCustomerRecord {
        id: "P01700000000".into(),
        ..source_batch().pump[0].clone()
    };
    assert_eq!(stored, vec![expected]);
}

#[tokio::test]
async fn test_drill_lookup_goes_through_batch_id() {
    let h = harness(OrchestratorConfig {
        aggregate_appends: 0,
        ..fast_config()
    });
    h.orchestrator
        .submit_batch(&source_batch(), 2)
        .await
        .unwrap();

    // Both units share the source oil batch id.
    let result = h
        .queries
        .get_by_id(Partition::DrillToRefinery, "OIL-100")
        .await
        .unwrap();
    assert_eq!(result.len(), 2);

    let err = h
        .queries
        .get_by_id(Partition::DrillToRefinery, "D01700000000")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_then_verify() {
    let h = harness(OrchestratorConfig {
        aggregate_appends: 1,
        ..fast_config()
    });
    h.orchestrator
        .submit_batch(&source_batch(), 2)
        .await
        .unwrap();

    let update = h
        .orchestrator
        .update_all(&Partition::ALL, &sample("update"))
        .await
        .unwrap();
    assert!(update.is_clean(), "{update}");
    assert_eq!(update.total(), 10);

    let pumps: Vec<PumpToCustomerRecord> = h
        .queries
        .list_records(Partition::PumpToCustomer)
        .await
        .unwrap();
    assert!(pumps.iter().all(|p| p.telemetry == sample("update")));

    let verification = h.queries.verify_all().await.unwrap();
    assert!(verification.is_clean(), "{verification}");
    assert_eq!(verification.checked, 2);
    // Creation sample, one append, one update each.
    assert_eq!(verification.samples, 6);
}
