//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Submission Orchestrator.

/// Source of the per-unit id suffix.
///
/// Production: `SystemClockIds` (wall clock seconds)
/// Testing: `SequentialIds`, `FixedIds`
///
/// Suffixes are a best-effort way to keep repeated runs against the same
/// world state apart. Two units that end up with the same id make the
/// second create fail with `AlreadyExists`; nothing is overwritten.
pub trait IdGenerator: Send + Sync {
    /// Suffix shared by every record of the next unit.
    fn next_suffix(&self) -> String;
}
