//! # Stage Schemas
//!
//! The five record schemas deployed across the six partitions. Storage to
//! factory and storage to pump share `StorageToConsumerSchema`.

use shared_types::{
    AggregateRecord, DrillToRefineryRecord, PumpToCustomerRecord, RefineryToStorageRecord,
    StorageToConsumerRecord, TelemetrySample,
};

use super::schema::{
    bill_args, sample_args, summary_args, ArgCursor, Lookup, StageSchema, TelemetryPolicy,
};

/// Embedded field used by the selector partitions.
pub const OIL_BATCH_FIELD: &str = "Oil_Batch_ID";

const BILL_FIELDS: [&str; 5] = [
    "Bill.Bill_Number",
    "Bill.Total_Payment",
    "Bill.Carrier_Name",
    "Bill.Carrier_Address",
    "Bill.Date",
];

// =============================================================================
// PARTITION 1: DRILL TO REFINERY
// =============================================================================

/// Drilling site to refinery hand-over.
pub struct DrillToRefinerySchema;

impl StageSchema for DrillToRefinerySchema {
    type Record = DrillToRefineryRecord;

    const NAME: &'static str = "drill-to-refinery";
    const CREATE_FIELDS: &'static [&'static str] = &[
        "Driller_Name",
        "RefineryID",
        "Refinery_Name",
        "Oil_Batch_ID",
        "Date",
        "Oil_Quality_Certificate",
        "Driller_Report",
        BILL_FIELDS[0],
        BILL_FIELDS[1],
        BILL_FIELDS[2],
        BILL_FIELDS[3],
        BILL_FIELDS[4],
        "Digital_Signature",
        "IoTData.Temperature",
        "IoTData.Pressure",
        "IoTData.Location",
        "IoTData.Quantity",
        "IoTData.Quality",
    ];
    const LOOKUP: Lookup = Lookup::Field(OIL_BATCH_FIELD);
    const TELEMETRY: TelemetryPolicy = TelemetryPolicy::Replace;

    fn record_id(record: &Self::Record) -> &str {
        &record.id
    }

    fn build(id: String, fields: &mut ArgCursor<'_>) -> Self::Record {
        DrillToRefineryRecord {
            id,
            driller_name: fields.text(),
            refinery_id: fields.text(),
            refinery_name: fields.text(),
            oil_batch_id: fields.text(),
            date: fields.text(),
            quality_certificate: fields.text(),
            driller_report: fields.text(),
            bill: fields.bill(),
            digital_signature: fields.text(),
            telemetry: fields.sample(),
        }
    }

    fn encode(record: &Self::Record) -> Vec<String> {
        let mut args = vec![
            record.driller_name.clone(),
            record.refinery_id.clone(),
            record.refinery_name.clone(),
            record.oil_batch_id.clone(),
            record.date.clone(),
            record.quality_certificate.clone(),
            record.driller_report.clone(),
        ];
        args.extend(bill_args(&record.bill));
        args.push(record.digital_signature.clone());
        args.extend(sample_args(&record.telemetry));
        args
    }

    fn apply_telemetry(record: &mut Self::Record, sample: TelemetrySample) {
        record.telemetry = sample;
    }
}

// =============================================================================
// PARTITION 2: REFINERY TO STORAGE
// =============================================================================

/// Refinery to storage facility hand-over.
pub struct RefineryToStorageSchema;

impl StageSchema for RefineryToStorageSchema {
    type Record = RefineryToStorageRecord;

    const NAME: &'static str = "refinery-to-storage";
    const CREATE_FIELDS: &'static [&'static str] = &[
        "Name",
        "Facility_ID",
        "Facility_Name",
        "Oil_Batch_ID",
        "Refinery_Detail",
        "Oil_Quantity_Certificate",
        "Oil_Quality_Certificate",
        BILL_FIELDS[0],
        BILL_FIELDS[1],
        BILL_FIELDS[2],
        BILL_FIELDS[3],
        BILL_FIELDS[4],
        "Digital_Signature",
        "Iot_Data.Temperature",
        "Iot_Data.Pressure",
        "Iot_Data.Location",
        "Iot_Data.Quantity",
        "Iot_Data.Quality",
    ];
    const LOOKUP: Lookup = Lookup::Field(OIL_BATCH_FIELD);
    const TELEMETRY: TelemetryPolicy = TelemetryPolicy::Replace;

    fn record_id(record: &Self::Record) -> &str {
        &record.id
    }

    fn build(id: String, fields: &mut ArgCursor<'_>) -> Self::Record {
        RefineryToStorageRecord {
            id,
            name: fields.text(),
            facility_id: fields.text(),
            facility_name: fields.text(),
            oil_batch_id: fields.text(),
            refinery_detail: fields.text(),
            quantity_certificate: fields.text(),
            quality_certificate: fields.text(),
            bill: fields.bill(),
            digital_signature: fields.text(),
            telemetry: fields.sample(),
        }
    }

    fn encode(record: &Self::Record) -> Vec<String> {
        let mut args = vec![
            record.name.clone(),
            record.facility_id.clone(),
            record.facility_name.clone(),
            record.oil_batch_id.clone(),
            record.refinery_detail.clone(),
            record.quantity_certificate.clone(),
            record.quality_certificate.clone(),
        ];
        args.extend(bill_args(&record.bill));
        args.push(record.digital_signature.clone());
        args.extend(sample_args(&record.telemetry));
        args
    }

    fn apply_telemetry(record: &mut Self::Record, sample: TelemetrySample) {
        record.telemetry = sample;
    }
}

// =============================================================================
// PARTITIONS 3 & 4: STORAGE TO FACTORY / PUMP
// =============================================================================

/// Storage to consumer hand-over, deployed on both storage partitions.
pub struct StorageToConsumerSchema;

impl StageSchema for StorageToConsumerSchema {
    type Record = StorageToConsumerRecord;

    const NAME: &'static str = "storage-to-consumer";
    const CREATE_FIELDS: &'static [&'static str] = &[
        "Name",
        "Consumer_ID",
        "Consumer_Name",
        "Oil_Batch_ID",
        "Oil_Quantity",
        "Oil_Quality_Certificate",
        BILL_FIELDS[0],
        BILL_FIELDS[1],
        BILL_FIELDS[2],
        BILL_FIELDS[3],
        BILL_FIELDS[4],
        "Compliance.Temperature",
        "Compliance.Pressure",
        "Iot_Data.Temperature",
        "Iot_Data.Pressure",
        "Iot_Data.Location",
        "Iot_Data.Quantity",
        "Iot_Data.Quality",
    ];
    const LOOKUP: Lookup = Lookup::Key;
    const TELEMETRY: TelemetryPolicy = TelemetryPolicy::Replace;

    fn record_id(record: &Self::Record) -> &str {
        &record.id
    }

    fn build(id: String, fields: &mut ArgCursor<'_>) -> Self::Record {
        StorageToConsumerRecord {
            id,
            name: fields.text(),
            consumer_id: fields.text(),
            consumer_name: fields.text(),
            oil_batch_id: fields.text(),
            quantity: fields.text(),
            quality_certificate: fields.text(),
            bill: fields.bill(),
            environment: fields.environment(),
            telemetry: fields.sample(),
        }
    }

    fn encode(record: &Self::Record) -> Vec<String> {
        let mut args = vec![
            record.name.clone(),
            record.consumer_id.clone(),
            record.consumer_name.clone(),
            record.oil_batch_id.clone(),
            record.quantity.clone(),
            record.quality_certificate.clone(),
        ];
        args.extend(bill_args(&record.bill));
        args.push(record.environment.temperature.clone());
        args.push(record.environment.pressure.clone());
        args.extend(sample_args(&record.telemetry));
        args
    }

    fn apply_telemetry(record: &mut Self::Record, sample: TelemetrySample) {
        record.telemetry = sample;
    }
}

// =============================================================================
// PARTITION 5: PUMP TO CUSTOMER
// =============================================================================

/// Oil pump to end customer hand-over.
pub struct PumpToCustomerSchema;

impl StageSchema for PumpToCustomerSchema {
    type Record = PumpToCustomerRecord;

    const NAME: &'static str = "pump-to-customer";
    const CREATE_FIELDS: &'static [&'static str] = &[
        "Name",
        "Consumer_ID",
        "Consumer_Name",
        "Oil_Batch_ID",
        "Oil_Quantity",
        "Oil_Quality_Certificate",
        BILL_FIELDS[0],
        BILL_FIELDS[1],
        BILL_FIELDS[2],
        BILL_FIELDS[3],
        BILL_FIELDS[4],
        "Iot_Data.Temperature",
        "Iot_Data.Pressure",
        "Iot_Data.Location",
        "Iot_Data.Quantity",
        "Iot_Data.Quality",
    ];
    const LOOKUP: Lookup = Lookup::Key;
    const TELEMETRY: TelemetryPolicy = TelemetryPolicy::Replace;

    fn record_id(record: &Self::Record) -> &str {
        &record.id
    }

    fn build(id: String, fields: &mut ArgCursor<'_>) -> Self::Record {
        PumpToCustomerRecord {
            id,
            name: fields.text(),
            consumer_id: fields.text(),
            consumer_name: fields.text(),
            oil_batch_id: fields.text(),
            quantity: fields.text(),
            quality_certificate: fields.text(),
            bill: fields.bill(),
            telemetry: fields.sample(),
        }
    }

    fn encode(record: &Self::Record) -> Vec<String> {
        let mut args = vec![
            record.name.clone(),
            record.consumer_id.clone(),
            record.consumer_name.clone(),
            record.oil_batch_id.clone(),
            record.quantity.clone(),
            record.quality_certificate.clone(),
        ];
        args.extend(bill_args(&record.bill));
        args.extend(sample_args(&record.telemetry));
        args
    }

    fn apply_telemetry(record: &mut Self::Record, sample: TelemetrySample) {
        record.telemetry = sample;
    }
}

// =============================================================================
// PARTITION 6: MAIN CHAIN
// =============================================================================

/// Cross-stage aggregate with an append-only telemetry log.
///
/// Creation takes exactly one sample, which becomes index 0 of the log.
pub struct MainChainSchema;

impl StageSchema for MainChainSchema {
    type Record = AggregateRecord;

    const NAME: &'static str = "main-chain";
    const CREATE_FIELDS: &'static [&'static str] = &[
        "Driller.Name",
        "Driller.Payment",
        "Driller.Date",
        "Refinery.Name",
        "Refinery.Payment",
        "Refinery.Date",
        "Refinery.Reail_Time_Summary",
        "Storage.Name",
        "Storage.Payment",
        "Storage.Date",
        "Storage.Reail_Time_Summary",
        "Consumer.Name",
        "Consumer.Payment",
        "Consumer.Date",
        "Consumer.Reail_Time_Summary",
        "Compliance_Report",
        "Payment",
        "Oil_Batch_ID",
        "Oil_Quality_Certificate",
        "Oil_Quantity",
        "Time_To_Complete",
        "Digital_Signature",
        "IotData.Temperature",
        "IotData.Pressure",
        "IotData.Location",
        "IotData.Quantity",
        "IotData.Quality",
    ];
    const LOOKUP: Lookup = Lookup::Key;
    const TELEMETRY: TelemetryPolicy = TelemetryPolicy::Append;

    fn record_id(record: &Self::Record) -> &str {
        &record.id
    }

    fn build(id: String, fields: &mut ArgCursor<'_>) -> Self::Record {
        AggregateRecord {
            id,
            driller: fields.summary(false),
            refinery: fields.summary(true),
            storage: fields.summary(true),
            consumer: fields.summary(true),
            compliance_report: fields.text(),
            total_payment: fields.text(),
            oil_batch_id: fields.text(),
            quality_certificate: fields.text(),
            quantity: fields.text(),
            elapsed_time: fields.text(),
            digital_signature: fields.text(),
            telemetry: vec![fields.sample()],
        }
    }

    /// Only the initial sample is part of the create arguments.
    fn encode(record: &Self::Record) -> Vec<String> {
        let mut args = summary_args(&record.driller, false);
        args.extend(summary_args(&record.refinery, true));
        args.extend(summary_args(&record.storage, true));
        args.extend(summary_args(&record.consumer, true));
        args.extend([
            record.compliance_report.clone(),
            record.total_payment.clone(),
            record.oil_batch_id.clone(),
            record.quality_certificate.clone(),
            record.quantity.clone(),
            record.elapsed_time.clone(),
            record.digital_signature.clone(),
        ]);
        let initial = record.telemetry.first().cloned().unwrap_or_default();
        args.extend(sample_args(&initial));
        args
    }

    fn apply_telemetry(record: &mut Self::Record, sample: TelemetrySample) {
        record.telemetry.push(sample);
    }
}
