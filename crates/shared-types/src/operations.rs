//! Contract operation names understood by every partition.

/// Create a record from positional arguments.
pub const CREATE: &str = "CreateAsset";

/// Read by key, or by embedded field on selector partitions.
pub const READ: &str = "ReadAsset";

/// Open-ended range scan of the partition.
pub const READ_ALL: &str = "GetAllAssets";

/// Remove a record.
pub const DELETE: &str = "DeleteAsset";

/// Existence check.
pub const EXISTS: &str = "AssetExists";

/// Replace the single telemetry sample of a stage record.
pub const REPLACE_TELEMETRY: &str = "ChangeIotData";

/// Append a sample to the aggregate record's telemetry log.
pub const APPEND_TELEMETRY: &str = "UpdateIoTLogs";
