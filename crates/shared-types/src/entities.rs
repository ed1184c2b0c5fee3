//! # Core Domain Entities
//!
//! Defines the custody records written to the partitions.
//!
//! ## Clusters
//!
//! - **Sub-entities**: `BillingInfo`, `TelemetrySample`, `EnvironmentReading`
//! - **Stage records**: `DrillToRefineryRecord`, `RefineryToStorageRecord`,
//!   `StorageToConsumerRecord`, `PumpToCustomerRecord`
//! - **Main chain**: `AggregateRecord` and its `PartySummary` entries

use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: SUB-ENTITIES
// =============================================================================

/// Bill of lading attached to every stage hand-over.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BillingInfo {
    #[serde(rename = "Bill_Number")]
    pub bill_number: String,
    #[serde(rename = "Total_Payment")]
    pub total_payment: String,
    #[serde(rename = "Carrier_Name")]
    pub carrier_name: String,
    #[serde(rename = "Carrier_Address")]
    pub carrier_address: String,
    #[serde(rename = "Date")]
    pub date: String,
}

/// One IoT measurement event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TelemetrySample {
    pub temperature: String,
    pub pressure: String,
    pub location: String,
    pub quantity: String,
    pub quality: String,
}

/// Storage environment reading recorded when oil leaves a storage facility.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentReading {
    pub temperature: String,
    pub pressure: String,
}

// =============================================================================
// CLUSTER B: STAGE RECORDS
// =============================================================================

/// Hand-over from the drilling site to the refinery (partition 1).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrillToRefineryRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Driller_Name")]
    pub driller_name: String,
    #[serde(rename = "RefineryID")]
    pub refinery_id: String,
    #[serde(rename = "Refinery_Name")]
    pub refinery_name: String,
    #[serde(rename = "Oil_Batch_ID")]
    pub oil_batch_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Oil_Quality_Certificate")]
    pub quality_certificate: String,
    #[serde(rename = "Driller_Report")]
    pub driller_report: String,
    #[serde(rename = "Bill")]
    pub bill: BillingInfo,
    #[serde(rename = "Digital_Signature")]
    pub digital_signature: String,
    #[serde(rename = "IoTData")]
    pub telemetry: TelemetrySample,
}

/// Hand-over from the refinery to a storage facility (partition 2).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefineryToStorageRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Facility_ID")]
    pub facility_id: String,
    #[serde(rename = "Facility_Name")]
    pub facility_name: String,
    #[serde(rename = "Oil_Batch_ID")]
    pub oil_batch_id: String,
    #[serde(rename = "Refinery_Detail")]
    pub refinery_detail: String,
    #[serde(rename = "Oil_Quantity_Certificate")]
    pub quantity_certificate: String,
    #[serde(rename = "Oil_Quality_Certificate")]
    pub quality_certificate: String,
    #[serde(rename = "Bill")]
    pub bill: BillingInfo,
    #[serde(rename = "Digital_Signature")]
    pub digital_signature: String,
    #[serde(rename = "Iot_Data")]
    pub telemetry: TelemetrySample,
}

/// Hand-over from storage to a consumer: a factory (partition 3) or an oil
/// pump (partition 4). Both partitions share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageToConsumerRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Consumer_ID", alias = "Facility_ID")]
    pub consumer_id: String,
    #[serde(rename = "Consumer_Name", alias = "Facility_Name")]
    pub consumer_name: String,
    #[serde(rename = "Oil_Batch_ID")]
    pub oil_batch_id: String,
    #[serde(rename = "Oil_Quality_Certificate")]
    pub quality_certificate: String,
    #[serde(rename = "Oil_Quantity")]
    pub quantity: String,
    #[serde(rename = "Bill")]
    pub bill: BillingInfo,
    #[serde(rename = "Compliance")]
    pub environment: EnvironmentReading,
    #[serde(rename = "Iot_Data")]
    pub telemetry: TelemetrySample,
}

/// Hand-over from the oil pump to the end customer (partition 5).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PumpToCustomerRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Consumer_ID", alias = "Facility_ID")]
    pub consumer_id: String,
    #[serde(rename = "Consumer_Name", alias = "Facility_Name")]
    pub consumer_name: String,
    #[serde(rename = "Oil_Batch_ID")]
    pub oil_batch_id: String,
    #[serde(rename = "Oil_Quality_Certificate")]
    pub quality_certificate: String,
    #[serde(rename = "Oil_Quantity")]
    pub quantity: String,
    #[serde(rename = "Bill")]
    pub bill: BillingInfo,
    #[serde(rename = "Iot_Data")]
    pub telemetry: TelemetrySample,
}

// =============================================================================
// CLUSTER C: MAIN CHAIN
// =============================================================================

/// Summary of one party's involvement, embedded in the aggregate record.
///
/// The driller summary carries no real-time status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartySummary {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Payment")]
    pub payment: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(
        rename = "Reail_Time_Summary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub real_time_status: Option<String>,
}

/// End-to-end summary of one oil batch (partition 6).
///
/// `telemetry` is append-only: index 0 is the sample recorded at creation
/// and later samples are only ever pushed to the end.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregateRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Driller")]
    pub driller: PartySummary,
    #[serde(rename = "Refinery")]
    pub refinery: PartySummary,
    #[serde(rename = "Storage")]
    pub storage: PartySummary,
    #[serde(rename = "Consumer")]
    pub consumer: PartySummary,
    #[serde(rename = "Compliance_Report")]
    pub compliance_report: String,
    #[serde(rename = "Payment")]
    pub total_payment: String,
    #[serde(rename = "Oil_Batch_ID")]
    pub oil_batch_id: String,
    #[serde(rename = "Oil_Quality_Certificate")]
    pub quality_certificate: String,
    #[serde(rename = "Oil_Quantity")]
    pub quantity: String,
    #[serde(rename = "Time_To_Complete")]
    pub elapsed_time: String,
    #[serde(rename = "Digital_Signature")]
    pub digital_signature: String,
    #[serde(rename = "IotData", default)]
    pub telemetry: Vec<TelemetrySample>,
}

impl AggregateRecord {
    /// First sample recorded at creation, if any.
    pub fn initial_sample(&self) -> Option<&TelemetrySample> {
        self.telemetry.first()
    }

    /// Most recent sample.
    pub fn latest_sample(&self) -> Option<&TelemetrySample> {
        self.telemetry.last()
    }
}
