// ============================================================
// Layer 3 — Partition Domain Type
// ============================================================
// A Partition is a named, immutable subset of records.
//
// The four partitions written to disk:
//   train — normal records only, used to fit the model
//   val   — normal + anomalous records, used to pick thresholds
//   val_p — the normal-only part of val
//   test  — normal + anomalous records, held out until the end
//
// Each partition becomes two arrays on disk:
//   X_<name>.npy  — feature matrix, one row per record
//   y_<name>.npy  — label vector, one entry per record
//
// Reference: Rust Book §6 (Enums), §8 (Vectors)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::record::Record;

/// Which of the four output partitions a set of records belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionKind {
    Train,
    Val,
    ValP,
    Test,
}

impl PartitionKind {
    /// All partitions, in the order they are written.
    pub const ALL: [PartitionKind; 4] = [
        PartitionKind::Train,
        PartitionKind::Val,
        PartitionKind::ValP,
        PartitionKind::Test,
    ];

    /// Suffix used in the output file names (X_<name>.npy)
    pub fn name(self) -> &'static str {
        match self {
            PartitionKind::Train => "train",
            PartitionKind::Val   => "val",
            PartitionKind::ValP  => "val_p",
            PartitionKind::Test  => "test",
        }
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A named subset of records.
///
/// `signal_len` is kept alongside the records so an empty
/// partition still knows its feature-matrix width.
#[derive(Debug, Clone)]
pub struct Partition {
    pub kind:       PartitionKind,
    pub signal_len: usize,
    pub records:    Vec<Record>,
}

impl Partition {
    pub fn new(kind: PartitionKind, signal_len: usize, records: Vec<Record>) -> Self {
        Self { kind, signal_len, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of records that carry a non-normal label
    pub fn anomaly_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_normal()).count()
    }

    /// Row-major feature values, `len() * signal_len` entries.
    pub fn feature_values(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.records.len() * self.signal_len);
        for r in &self.records {
            out.extend_from_slice(&r.signal);
        }
        out
    }

    /// Labels as floats, matching the dtype the table was parsed with.
    pub fn label_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.label as f64).collect()
    }
}
