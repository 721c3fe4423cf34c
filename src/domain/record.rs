// ============================================================
// Layer 3 — Record Domain Type
// ============================================================
// One row of the ECG5000 table: a class label followed by the
// heartbeat signal.
//
// Class 1 is a normal heartbeat. Classes 2..=5 are different
// kinds of abnormal beats; for this pipeline they are all
// simply "anomalous".
//
// The label is stored as an integer because the table encodes
// classes as whole numbers (written as 1.0000000e+00 etc.).
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// Class label that marks a normal heartbeat.
pub const NORMAL_LABEL: i64 = 1;

/// A single labelled time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Class label (1 = normal, anything else = anomalous)
    pub label: i64,

    /// The sampled signal, one value per time step
    pub signal: Vec<f64>,
}

impl Record {
    /// Create a new Record from a label and its signal.
    pub fn new(label: i64, signal: Vec<f64>) -> Self {
        Self { label, signal }
    }

    /// True if this record carries the normal class label.
    pub fn is_normal(&self) -> bool {
        self.label == NORMAL_LABEL
    }

    /// Number of time steps in the signal
    pub fn len(&self) -> usize {
        self.signal.len()
    }
}
