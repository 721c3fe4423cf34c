// ============================================================
// Layer 2 — Application Layer
// ============================================================
// Orchestrates the pipeline stages in order. This layer knows
// WHAT happens and in which order, but delegates HOW to the data
// and infrastructure layers.
//
//   prepare_use_case.rs — download → extract → load → partition
//                         → save, driven by a PrepareConfig
//
// Reference: Rust Book §7 (Modules)

pub mod prepare_use_case;
