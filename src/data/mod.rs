// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw text tables on disk and the
// finished partitions:
//
//   ECG5000_TRAIN.txt + ECG5000_TEST.txt
//       │
//       ▼
//   UcrTableLoader    → parses both tables into Records
//       │
//       ▼
//   Partitioner       → normal / anomalous, then seeded splits
//       │                (uses the splitter module)
//       ▼
//   PartitionSet      → train, val, val_p, test
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Parses UCR-format text tables into records
pub mod loader;

/// Seeded random and stratified holdout splits
pub mod splitter;

/// Builds the train / val / val_p / test partitions
pub mod partitioner;
