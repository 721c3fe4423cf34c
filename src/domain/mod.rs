// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing the dataset:
//
//   record.rs    — one labelled time series (a row of the table)
//   partition.rs — a named subset of records (train/val/val_p/test)
//   traits.rs    — where records come from and where partitions go
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO array / serialisation formats
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A single labelled ECG signal
pub mod record;

// Named subsets of records produced by the partitioner
pub mod partition;

// Core abstractions (traits) that other layers implement
pub mod traits;
