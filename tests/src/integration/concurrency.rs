//! Failure isolation under fan-out and same-id races from outside the
//! orchestrator.

use std::sync::Arc;

use cc_01_record_store::domain::telemetry_args;
use cc_01_record_store::{DrillToRefinerySchema, StageSchema};
use cc_02_ledger_gateway::{LedgerGateway, ScriptedFaults, TxValidationCode};
use cc_03_submission::{OrchestratorConfig, SubmissionFailure};
use shared_types::{operations, DrillToRefineryRecord, Partition};

use super::fixtures::{fast_config, harness, harness_with_faults, sample, source_batch};

#[tokio::test]
async fn test_one_failed_task_leaves_siblings_complete() {
    let faults = Arc::new(ScriptedFaults::new());
    faults.fail_always(Partition::RefineryToStorage, "R21700000002");
    let h = harness_with_faults(
        OrchestratorConfig {
            aggregate_appends: 2,
            ..fast_config()
        },
        faults,
    );

    let report = h
        .orchestrator
        .submit_batch(&source_batch(), 4)
        .await
        .unwrap();

    assert_eq!(report.total(), 4 * (5 + 2));
    assert_eq!(report.failed(), 1);
    assert_eq!(report.summary(), "1 of 28 submissions failed");
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.unit, 2);
    assert_eq!(failure.partition, Partition::RefineryToStorage);
    assert!(failure.to_string().contains("R21700000002"));

    assert_eq!(h.ledger.record_count(Partition::RefineryToStorage), 3);
    assert_eq!(h.ledger.record_count(Partition::MainChain), 4);
    assert_eq!(h.orchestrator.progress().outstanding(), 0);
}

#[tokio::test]
async fn test_colliding_create_is_already_exists() {
    let h = harness(OrchestratorConfig {
        aggregate_appends: 0,
        ..fast_config()
    });
    let input = source_batch();
    h.orchestrator.submit_batch(&input, 1).await.unwrap();

    // Same derived id as unit 0 of the batch above.
    let colliding = DrillToRefineryRecord {
        id: "D01700000000".into(),
        ..input.drill[0].clone()
    };
    let err = h
        .ledger
        .submit_transaction(
            Partition::DrillToRefinery,
            operations::CREATE,
            &DrillToRefinerySchema::to_args(&colliding),
        )
        .await
        .unwrap_err();

    assert!(err.is_already_exists());
    assert!(!err.is_transient());
    let failure: SubmissionFailure = err.into();
    assert!(failure.is_already_exists());
    assert_eq!(h.ledger.record_count(Partition::DrillToRefinery), 1);
}

#[tokio::test]
async fn test_racing_appends_from_outside_conflict() {
    let h = harness(OrchestratorConfig {
        aggregate_appends: 0,
        ..fast_config()
    });
    h.orchestrator
        .submit_batch(&source_batch(), 1)
        .await
        .unwrap();
    let id = "M00101700000000";

    let first = telemetry_args(id, &sample("a"));
    let second = telemetry_args(id, &sample("b"));
    // Both endorse against the same version before either commits.
    let (a, b) = tokio::join!(
        h.ledger
            .submit_async(Partition::MainChain, operations::APPEND_TELEMETRY, &first),
        h.ledger
            .submit_async(Partition::MainChain, operations::APPEND_TELEMETRY, &second),
    );
    let a = a.unwrap().1.status().await.unwrap();
    let b = b.unwrap().1.status().await.unwrap();

    let mut codes = vec![a.code, b.code];
    codes.sort_by_key(|code| code.to_string());
    assert_eq!(
        codes,
        vec![TxValidationCode::MvccReadConflict, TxValidationCode::Valid]
    );

    let aggregate = h.queries.aggregate(id).await.unwrap();
    assert_eq!(aggregate.telemetry.len(), 2);
}

#[tokio::test]
async fn test_orchestrator_appends_never_conflict() {
    let h = harness(OrchestratorConfig {
        aggregate_appends: 6,
        max_in_flight: 2,
        ..fast_config()
    });

    let report = h
        .orchestrator
        .submit_batch(&source_batch(), 3)
        .await
        .unwrap();

    assert!(report.is_clean(), "{report}");
    for id in report.created_aggregates() {
        assert_eq!(h.queries.aggregate(id).await.unwrap().telemetry.len(), 7);
    }
}
