// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to the data and infrastructure
// layers only through these traits:
//   - UcrTableLoader implements RecordSource
//   - NpyStore       implements PartitionSink
//
// Tests swap in in-memory implementations of either side.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::partition::Partition;
use crate::domain::record::Record;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the full set of labelled records.
pub trait RecordSource {
    /// Load every record, in source order.
    fn load_all(&self) -> Result<Vec<Record>>;
}

// ─── PartitionSink ────────────────────────────────────────────────────────────
/// Any component that can persist a finished partition.
pub trait PartitionSink {
    /// Write one partition, replacing whatever was stored under its name.
    fn save_partition(&self, partition: &Partition) -> Result<()>;
}
