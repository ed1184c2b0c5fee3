//! # Stage Schema
//!
//! One generic contract serves every partition; what differs between
//! partitions is described here as data: the ordered create-field list,
//! the read semantics and how a telemetry update lands on the record.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{operations, BillingInfo, EnvironmentReading, PartySummary, TelemetrySample};

use super::errors::ContractError;

/// Number of positional arguments carried by a telemetry sample.
pub const SAMPLE_ARITY: usize = 5;

/// How `ReadAsset` resolves its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Single-key lookup.
    Key,
    /// Predicate scan over an embedded field; may return several records.
    Field(&'static str),
}

/// How a telemetry update modifies the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryPolicy {
    /// Overwrite the single sample.
    Replace,
    /// Push onto the append-only log.
    Append,
}

impl TelemetryPolicy {
    /// Contract operation name for this policy.
    pub fn operation(self) -> &'static str {
        match self {
            TelemetryPolicy::Replace => operations::REPLACE_TELEMETRY,
            TelemetryPolicy::Append => operations::APPEND_TELEMETRY,
        }
    }
}

/// Field set and behaviour of one partition's records.
pub trait StageSchema: Send + Sync + 'static {
    /// Stored record shape.
    type Record: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static;

    /// Schema name used in logs.
    const NAME: &'static str;

    /// Create arguments following the id, in positional order.
    const CREATE_FIELDS: &'static [&'static str];

    /// Read semantics.
    const LOOKUP: Lookup;

    /// Telemetry update semantics.
    const TELEMETRY: TelemetryPolicy;

    /// Key the record is stored under.
    fn record_id(record: &Self::Record) -> &str;

    /// Build a record from arguments already checked for arity.
    fn build(id: String, fields: &mut ArgCursor<'_>) -> Self::Record;

    /// Inverse of `build`: the create arguments following the id.
    fn encode(record: &Self::Record) -> Vec<String>;

    /// Land a telemetry sample on the record.
    fn apply_telemetry(record: &mut Self::Record, sample: TelemetrySample);

    /// Total `CreateAsset` arity including the id.
    fn create_arity() -> usize {
        Self::CREATE_FIELDS.len() + 1
    }

    /// Decode `CreateAsset` arguments.
    fn from_args(args: &[String]) -> Result<Self::Record, ContractError> {
        let invalid = || ContractError::InvalidArguments {
            operation: operations::CREATE.to_string(),
            expected: Self::create_arity(),
            got: args.len(),
        };
        if args.len() != Self::create_arity() {
            return Err(invalid());
        }
        let Some((id, rest)) = args.split_first() else {
            return Err(invalid());
        };
        let mut cursor = ArgCursor::new(rest);
        Ok(Self::build(id.clone(), &mut cursor))
    }

    /// Encode a record as `CreateAsset` arguments.
    fn to_args(record: &Self::Record) -> Vec<String> {
        let mut args = Vec::with_capacity(Self::create_arity());
        args.push(Self::record_id(record).to_string());
        args.extend(Self::encode(record));
        args
    }
}

/// Sequential reader over positional string arguments.
///
/// Arity is validated before a cursor is handed out, so running past the end
/// yields empty strings rather than an error.
pub struct ArgCursor<'a> {
    args: std::slice::Iter<'a, String>,
}

impl<'a> ArgCursor<'a> {
    /// Wrap a slice of arguments.
    pub fn new(args: &'a [String]) -> Self {
        Self { args: args.iter() }
    }

    /// Next plain text argument.
    pub fn text(&mut self) -> String {
        self.args.next().cloned().unwrap_or_default()
    }

    /// Next five arguments as a bill.
    pub fn bill(&mut self) -> BillingInfo {
        BillingInfo {
            bill_number: self.text(),
            total_payment: self.text(),
            carrier_name: self.text(),
            carrier_address: self.text(),
            date: self.text(),
        }
    }

    /// Next five arguments as a telemetry sample.
    pub fn sample(&mut self) -> TelemetrySample {
        TelemetrySample {
            temperature: self.text(),
            pressure: self.text(),
            location: self.text(),
            quantity: self.text(),
            quality: self.text(),
        }
    }

    /// Next two arguments as an environment reading.
    pub fn environment(&mut self) -> EnvironmentReading {
        EnvironmentReading {
            temperature: self.text(),
            pressure: self.text(),
        }
    }

    /// Next three (or four, with status) arguments as a party summary.
    pub fn summary(&mut self, with_status: bool) -> PartySummary {
        PartySummary {
            name: self.text(),
            payment: self.text(),
            date: self.text(),
            real_time_status: with_status.then(|| self.text()),
        }
    }
}

/// Positional form of a bill.
pub fn bill_args(bill: &BillingInfo) -> [String; 5] {
    [
        bill.bill_number.clone(),
        bill.total_payment.clone(),
        bill.carrier_name.clone(),
        bill.carrier_address.clone(),
        bill.date.clone(),
    ]
}

/// Positional form of a telemetry sample.
pub fn sample_args(sample: &TelemetrySample) -> [String; SAMPLE_ARITY] {
    [
        sample.temperature.clone(),
        sample.pressure.clone(),
        sample.location.clone(),
        sample.quantity.clone(),
        sample.quality.clone(),
    ]
}

/// Positional form of a party summary.
pub fn summary_args(summary: &PartySummary, with_status: bool) -> Vec<String> {
    let mut args = vec![
        summary.name.clone(),
        summary.payment.clone(),
        summary.date.clone(),
    ];
    if with_status {
        args.push(summary.real_time_status.clone().unwrap_or_default());
    }
    args
}

/// Arguments of a telemetry update: the record key followed by the sample.
pub fn telemetry_args(id: &str, sample: &TelemetrySample) -> Vec<String> {
    let mut args = Vec::with_capacity(SAMPLE_ARITY + 1);
    args.push(id.to_string());
    args.extend(sample_args(sample));
    args
}

/// Decode telemetry update arguments into `(key, sample)`.
pub fn parse_telemetry_args(
    operation: &str,
    args: &[String],
) -> Result<(String, TelemetrySample), ContractError> {
    match args.split_first() {
        Some((id, rest)) if rest.len() == SAMPLE_ARITY => {
            Ok((id.clone(), ArgCursor::new(rest).sample()))
        }
        _ => Err(ContractError::InvalidArguments {
            operation: operation.to_string(),
            expected: SAMPLE_ARITY + 1,
            got: args.len(),
        }),
    }
}
