//! Shared fixtures: a small source batch and a wired-up ledger.

use std::sync::Arc;

use cc_02_ledger_gateway::{FaultInjector, GatewayConfig, InMemoryLedger, NoFaults};
use cc_03_submission::{
    AggregateDefaults, BatchInput, OrchestratorConfig, SequentialIds, SubmissionOrchestrator,
};
use cc_04_query_client::QueryClient;
use shared_types::{
    BillingInfo, DrillToRefineryRecord, EnvironmentReading, PumpToCustomerRecord,
    RefineryToStorageRecord, StorageToConsumerRecord, TelemetrySample,
};

pub fn sample(stage: &str) -> TelemetrySample {
    TelemetrySample {
        temperature: format!("{stage} 38C"),
        pressure: format!("{stage} 101kPa"),
        location: format!("{stage} site"),
        quantity: "1000bbl".to_string(),
        quality: "A".to_string(),
    }
}

fn bill(number: &str) -> BillingInfo {
    BillingInfo {
        bill_number: number.to_string(),
        total_payment: "$ 25,000".to_string(),
        carrier_name: "Gulf Carriers".to_string(),
        carrier_address: "Basra Port".to_string(),
        date: "2024-03-01".to_string(),
    }
}

/// One record per source, fully populated.
pub fn source_batch() -> BatchInput {
    BatchInput {
        drill: vec![DrillToRefineryRecord {
            id: "D".into(),
            driller_name: "Rumaila Field".into(),
            refinery_id: "RF-1".into(),
            refinery_name: "Basra Refinery".into(),
            oil_batch_id: "OIL-100".into(),
            date: "2024-03-01".into(),
            quality_certificate: "QC-7".into(),
            driller_report: "nominal".into(),
            bill: bill("B-1"),
            digital_signature: "sig-d".into(),
            telemetry: sample("drill"),
        }],
        refinery: vec![RefineryToStorageRecord {
            id: "R".into(),
            name: "Basra Refinery".into(),
            facility_id: "ST-1".into(),
            facility_name: "Fao Storage".into(),
            oil_batch_id: "OIL-100".into(),
            refinery_detail: "distillation".into(),
            quantity_certificate: "QTY-7".into(),
            quality_certificate: "QC-8".into(),
            bill: bill("B-2"),
            digital_signature: "sig-r".into(),
            telemetry: sample("refinery"),
        }],
        storage: vec![StorageToConsumerRecord {
            id: "S".into(),
            name: "Fao Storage".into(),
            consumer_id: "C-1".into(),
            consumer_name: "Pump 12".into(),
            oil_batch_id: "OIL-100".into(),
            quality_certificate: "QC-8".into(),
            quantity: "900bbl".into(),
            bill: bill("B-3"),
            environment: EnvironmentReading {
                temperature: "21C".into(),
                pressure: "1atm".into(),
            },
            telemetry: sample("storage"),
        }],
        pump: vec![PumpToCustomerRecord {
            id: "P".into(),
            name: "Pump 12".into(),
            consumer_id: "CU-1".into(),
            consumer_name: "City Transit".into(),
            oil_batch_id: "OIL-100".into(),
            quality_certificate: "QC-8".into(),
            quantity: "850bbl".into(),
            bill: bill("B-4"),
            telemetry: sample("pump"),
        }],
    }
}

pub fn fast_config() -> OrchestratorConfig {
    OrchestratorConfig {
        append_interval_ms: 1,
        retry_backoff_ms: 1,
        ..Default::default()
    }
}

pub struct Harness {
    pub ledger: InMemoryLedger,
    pub orchestrator: SubmissionOrchestrator,
    pub queries: QueryClient,
}

pub fn harness(config: OrchestratorConfig) -> Harness {
    harness_with_faults(config, Arc::new(NoFaults))
}

pub fn harness_with_faults(config: OrchestratorConfig, faults: Arc<dyn FaultInjector>) -> Harness {
    let ledger = InMemoryLedger::with_faults(GatewayConfig::default(), faults);
    let orchestrator = SubmissionOrchestrator::new(
        Arc::new(ledger.clone()),
        Arc::new(SequentialIds::starting_at(1_700_000_000)),
        config,
        AggregateDefaults::default(),
    );
    let queries = QueryClient::new(Arc::new(ledger.clone()));
    Harness {
        ledger,
        orchestrator,
        queries,
    }
}
